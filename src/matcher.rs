//! Command matcher - anchored pattern tables with a fuzzy keyword fallback
//!
//! Parsing runs in stages: every intent's patterns are tried in declaration
//! order first; if none match, keywords are scored against the command
//! (substring hits beat fuzzy token similarity); anything still unresolved
//! comes back as unknown with generic suggestions.

use regex::{Captures, Regex};
use serde_json::json;
use tracing::{debug, trace};

use crate::describe;
use crate::extract::{self, ExtractError};
use crate::pages::parse_page_range;
use crate::policy;
use crate::similarity::sequence_ratio;
use crate::suggest;
use crate::types::{DocumentContext, Intent, Params, ParsedCommand};

/// Confidence for an anchored pattern match
pub const PATTERN_CONFIDENCE: f64 = 0.95;
/// Confidence for a direct keyword substring hit
pub const KEYWORD_CONFIDENCE: f64 = 0.8;
/// Minimum sequence ratio for a fuzzy token comparison to count
pub const FUZZY_RATIO_THRESHOLD: f64 = 0.7;
/// Discount applied to fuzzy token scores relative to substring hits
pub const FUZZY_DISCOUNT: f64 = 0.7;
/// Results at or below this confidence are reported as unknown
pub const MIN_CONFIDENCE: f64 = 0.5;

type Extractor = fn(&Captures<'_>, &DocumentContext) -> Result<Params, ExtractError>;

/// Pattern table in priority order: the first match wins, both within an
/// intent and across intents. Relative page forms come before the greedy
/// catch-all remove form, and the lock/secure-document form before the
/// generic encrypt form, so specific phrasings are not swallowed. Sources
/// are compiled anchored at the start and case-insensitive.
static COMMAND_PATTERNS: &[(Intent, &[(&str, Extractor)])] = &[
    (
        Intent::RemovePages,
        &[
            (
                r"(?:remove|delete)\s+(?:the\s+)?(?:last|first)\s+(\d+)\s+pages?",
                extract::relative_pages,
            ),
            (
                r"(?:remove|delete|drop|get rid of|take out)\s+(?:pages?\s+)?(.+)",
                extract::page_set,
            ),
        ],
    ),
    (
        Intent::RotatePages,
        &[
            // Degree-marked forms first: "by N" or a "degrees" suffix with
            // no page expression means the whole document turns
            (
                r"rotate\s+by\s+(\d+)\s*(?:degrees?)?$",
                extract::rotation_degrees,
            ),
            (r"rotate\s+(\d+)\s*degrees?$", extract::rotation_degrees),
            (
                r"rotate\s+(?:pages?\s+)?(.+?)\s+(?:by\s+)?(\d+)\s*(?:degrees?)?$",
                extract::rotation,
            ),
            (
                r"rotate\s+(?:pages?\s+)?(.+?)?\s*(clockwise|counterclockwise|left|right)$",
                extract::rotation_direction,
            ),
            (
                r"turn\s+(?:pages?\s+)?(.+?)?\s+(clockwise|counterclockwise|right|left|upside down)",
                extract::rotation_direction,
            ),
            (r"rotate\s+(?:pages?\s+)?(.+?)$", extract::rotation),
            (
                r"flip(?:\s+(?:pages?\s+)?(.+?)?)?\s*(?:upside down)?$",
                extract::flip,
            ),
        ],
    ),
    (
        Intent::AddWatermark,
        &[
            (
                r#"(?:add\s+)?(?:a\s+)?watermark\s+(?:all\s+)?(?:pages?\s+)?(?:saying\s+|with\s+(?:text\s+)?|text\s+)?["']?(.+?)["']?(?:\s+(?:at\s+)?(\d+)%?\s*(?:opacity)?)?$"#,
                extract::watermark,
            ),
            (
                r#"(?:add|put)\s+["'](.+?)["']\s+(?:as\s+)?(?:a\s+)?watermark"#,
                extract::watermark,
            ),
        ],
    ),
    (
        Intent::Encrypt,
        &[
            (
                r#"(?:secure|lock)\s+(?:the\s+)?(?:document|pdf|file)(?:\s+with\s+["']?(.+?)["']?)?$"#,
                extract::password_optional,
            ),
            (
                r#"(?:encrypt|protect|password[- ]?protect|lock)\s+(?:with\s+)?(?:password\s+)?["']?(.+?)["']?$"#,
                extract::password,
            ),
            (
                r#"(?:add|set)\s+(?:a\s+)?password\s+["']?(.+?)["']?$"#,
                extract::password,
            ),
        ],
    ),
    (
        Intent::Split,
        &[
            (
                r"split\s+(?:into\s+)?(?:individual\s+|separate\s+)?pages?",
                extract::split_individual,
            ),
            (r"split\s+(?:every|each)\s+(\d+)\s+pages?", extract::split_count),
            (r"split\s+(?:at\s+)?pages?\s+(.+)", extract::split_at),
            (
                r"(?:extract|separate)\s+pages?\s+(.+?)(?:\s+(?:as|into)\s+(?:a\s+)?(?:separate|new)\s+(?:file|pdf))?$",
                extract::split_ranges,
            ),
        ],
    ),
    (
        Intent::AddBlankPage,
        &[
            (
                r"(?:add|insert)\s+(?:a\s+)?blank\s+page\s+(?:at\s+)?(?:position\s+)?(\d+)",
                extract::position,
            ),
            (
                r"(?:add|insert)\s+(?:a\s+)?blank\s+page\s+(?:after|before)\s+(?:page\s+)?(\d+)",
                extract::position_relative,
            ),
            (
                r"(?:add|insert)\s+(?:a\s+)?(?:new\s+)?(?:empty|blank)\s+page(?:\s+(?:at\s+)?(?:the\s+)?(?:end|beginning|start))?",
                extract::position_keyword,
            ),
        ],
    ),
    (
        Intent::ExtractText,
        &[
            (
                r"(?:extract|get|copy|grab|pull)\s+(?:all\s+)?(?:the\s+)?text(?:\s+from\s+(?:pages?\s+)?(.+))?",
                extract::passthrough_pages,
            ),
            (
                r"(?:copy|get)\s+(?:the\s+)?(?:text|content)(?:\s+from\s+(?:pages?\s+)?(.+))?",
                extract::passthrough_pages,
            ),
        ],
    ),
    (
        Intent::Ocr,
        &[
            (
                r"(?:ocr|recognize\s+text\s+in)\s+(?:this\s+)?(?:document|pdf|file)?(?:\s+(?:pages?\s+)?(.+))?",
                extract::ocr_pages,
            ),
            (
                r"(?:make|convert)\s+(?:this\s+)?(?:pdf\s+)?searchable",
                extract::ocr_searchable,
            ),
            (
                r"(?:extract|recognize)\s+text\s+(?:from\s+)?(?:scanned?\s+)?(?:images?|pages?)",
                extract::ocr_simple,
            ),
        ],
    ),
    (
        Intent::UpdateMetadata,
        &[
            (
                r#"(?:set|change|update)\s+(?:the\s+)?title\s+(?:to\s+)?["']?(.+?)["']?$"#,
                extract::metadata_title,
            ),
            (
                r#"(?:set|change|update)\s+(?:the\s+)?author\s+(?:to\s+)?["']?(.+?)["']?$"#,
                extract::metadata_author,
            ),
            (
                r#"(?:set|change|update)\s+(?:the\s+)?subject\s+(?:to\s+)?["']?(.+?)["']?$"#,
                extract::metadata_subject,
            ),
        ],
    ),
    (
        Intent::ReorderPages,
        &[
            (
                r"(?:reorder|rearrange)\s+pages?\s+(?:to|as)\s+(.+)",
                extract::new_order,
            ),
            (
                r"(?:move|put)\s+page\s+(\d+)\s+(?:to\s+)?(?:position\s+)?(\d+)",
                extract::move_page,
            ),
            (
                r"(?:swap|switch)\s+pages?\s+(\d+)\s+(?:and|with)\s+(\d+)",
                extract::swap_pages,
            ),
        ],
    ),
    (
        Intent::ExtractImages,
        &[(
            r"(?:extract|get|save|export)\s+(?:all\s+)?(?:the\s+)?images?(?:\s+from\s+(?:pages?\s+)?(.+))?",
            extract::passthrough_pages,
        )],
    ),
    (
        Intent::ExtractTables,
        &[(
            r"(?:extract|get|export)\s+(?:all\s+)?(?:the\s+)?tables?(?:\s+from\s+(?:pages?\s+)?(.+))?",
            extract::passthrough_pages,
        )],
    ),
];

/// Keyword table for the fallback stage, checked in declaration order
static INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::RemovePages,
        &["remove", "delete", "drop", "rid", "take out"],
    ),
    (
        Intent::RotatePages,
        &["rotate", "turn", "flip", "orientation"],
    ),
    (Intent::AddWatermark, &["watermark", "stamp", "mark"]),
    (
        Intent::Encrypt,
        &["encrypt", "protect", "password", "lock", "secure"],
    ),
    (Intent::Split, &["split", "separate", "divide", "extract"]),
    (
        Intent::AddBlankPage,
        &["blank", "empty", "new page", "insert page"],
    ),
    (
        Intent::ExtractText,
        &["extract text", "get text", "copy text", "grab text"],
    ),
    (Intent::Ocr, &["ocr", "searchable", "recognize", "scan"]),
    (
        Intent::UpdateMetadata,
        &["title", "author", "subject", "metadata"],
    ),
    (
        Intent::ReorderPages,
        &["reorder", "rearrange", "move page", "swap"],
    ),
    (
        Intent::ExtractImages,
        &["extract image", "get image", "save image"],
    ),
    (Intent::ExtractTables, &["extract table", "get table"]),
];

struct CompiledPattern {
    regex: Regex,
    extract: Extractor,
}

struct IntentPatterns {
    intent: Intent,
    patterns: Vec<CompiledPattern>,
}

/// Parses natural-language commands into executable operations
pub struct CommandParser {
    intents: Vec<IntentPatterns>,
    page_hint: Regex,
    quoted: Regex,
}

impl CommandParser {
    pub fn new() -> Self {
        // Compile the static tables once; a bad pattern is a build defect
        let intents = COMMAND_PATTERNS
            .iter()
            .map(|(intent, patterns)| IntentPatterns {
                intent: *intent,
                patterns: patterns
                    .iter()
                    .map(|(source, extract)| CompiledPattern {
                        regex: Regex::new(&format!("(?i)^(?:{source})"))
                            .expect("Invalid command pattern"),
                        extract: *extract,
                    })
                    .collect(),
            })
            .collect();

        Self {
            intents,
            page_hint: Regex::new(r"(?i)pages?\s+(\d+(?:\s*[-,]\s*\d+)*)")
                .expect("Invalid command pattern"),
            quoted: Regex::new(r#"["'](.+?)["']"#).expect("Invalid command pattern"),
        }
    }

    /// Parse a command against the document it applies to
    ///
    /// Never fails: commands that cannot be resolved, including matches
    /// whose parameters turn out to be unusable, come back as the unknown
    /// intent with zero confidence and suggestions to try instead.
    pub fn parse(&self, command: &str, context: &DocumentContext) -> ParsedCommand {
        let command = command.trim();

        for intent_patterns in &self.intents {
            for pattern in &intent_patterns.patterns {
                if let Some(caps) = pattern.regex.captures(command) {
                    return match (pattern.extract)(&caps, context) {
                        Ok(params) => {
                            debug!(
                                intent = intent_patterns.intent.as_str(),
                                pattern = pattern.regex.as_str(),
                                "pattern match"
                            );
                            build_command(
                                intent_patterns.intent,
                                params,
                                command,
                                context,
                                PATTERN_CONFIDENCE,
                            )
                        }
                        Err(err) => {
                            debug!(
                                intent = intent_patterns.intent.as_str(),
                                error = %err,
                                "extraction failed"
                            );
                            ParsedCommand::unknown(command, suggest::generic())
                        }
                    };
                }
            }
        }

        let (intent, confidence) = fuzzy_match_intent(command);
        if intent != Intent::Unknown && confidence > MIN_CONFIDENCE {
            debug!(intent = intent.as_str(), confidence, "fuzzy match");
            let params = self.generic_params(command, intent, context);
            let mut result = build_command(intent, params, command, context, confidence);
            result.suggestions = suggest::for_intent(intent);
            return result;
        }

        debug!(command, "no intent matched");
        ParsedCommand::unknown(command, suggest::generic())
    }

    /// Best-effort parameters for keyword-only matches: an unanchored page
    /// expression, and quoted text where the intent can use it
    fn generic_params(&self, command: &str, intent: Intent, context: &DocumentContext) -> Params {
        let mut params = Params::new();

        if let Some(caps) = self.page_hint.captures(command) {
            if let Some(expr) = caps.get(1) {
                params.insert(
                    "pages".to_string(),
                    json!(parse_page_range(Some(expr.as_str()), context.num_pages)),
                );
            }
        }

        if let Some(caps) = self.quoted.captures(command) {
            if let Some(text) = caps.get(1) {
                match intent {
                    Intent::AddWatermark => {
                        params.insert("text".to_string(), json!(text.as_str()));
                    }
                    Intent::Encrypt => {
                        params.insert("user_password".to_string(), json!(text.as_str()));
                    }
                    _ => {}
                }
            }
        }

        params
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn build_command(
    intent: Intent,
    params: Params,
    command: &str,
    context: &DocumentContext,
    confidence: f64,
) -> ParsedCommand {
    let mut api_payload = params.clone();
    api_payload.insert("file_id".to_string(), json!(context.file_id));

    ParsedCommand {
        intent,
        confidence,
        original_text: command.to_string(),
        api_endpoint: intent.api_endpoint().to_string(),
        api_payload,
        is_destructive: intent.is_destructive(),
        human_readable_action: describe::action(intent, &params, context),
        warnings: policy::warnings(intent, &params, context),
        suggestions: Vec::new(),
        parameters: params,
    }
}

/// Score every keyword against the command
///
/// A substring hit scores KEYWORD_CONFIDENCE. Otherwise each whitespace
/// token is compared to the keyword and close matches score their ratio
/// discounted by FUZZY_DISCOUNT. The highest score across all keywords
/// decides the intent.
pub fn fuzzy_match_intent(command: &str) -> (Intent, f64) {
    let lower = command.to_lowercase();
    let tokens: Vec<&str> = lower.split_whitespace().collect();

    let mut best_intent = Intent::Unknown;
    let mut best_score = 0.0_f64;

    for (intent, keywords) in INTENT_KEYWORDS {
        for keyword in keywords.iter().copied() {
            let score = if lower.contains(keyword) {
                KEYWORD_CONFIDENCE
            } else {
                let mut fuzzy = 0.0_f64;
                for token in &tokens {
                    let ratio = sequence_ratio(keyword, token);
                    if ratio > FUZZY_RATIO_THRESHOLD && ratio * FUZZY_DISCOUNT > fuzzy {
                        fuzzy = ratio * FUZZY_DISCOUNT;
                    }
                }
                fuzzy
            };

            if score > best_score {
                trace!(intent = intent.as_str(), keyword, score, "keyword candidate");
                best_score = score;
                best_intent = *intent;
            }
        }
    }

    (best_intent, best_score)
}
