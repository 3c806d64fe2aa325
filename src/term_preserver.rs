/*!
 * Technical-term protection and restoration.
 *
 * CVE advisories are full of identifiers that must survive translation
 * byte-for-byte: CVE ids, vendor advisory codes, product/version strings,
 * URLs, hashes. This module detects those spans, swaps them for opaque
 * `[KEEP:NNNN]` tokens before the text is sent to a translation provider,
 * and restores the originals afterwards.
 *
 * Detection is driven by a prioritized, ordered table of regex matchers.
 * The table order IS the overlap-resolution policy: a span claimed by an
 * earlier category is never re-tokenized by a later one, and within the
 * product-vocabulary category the pattern absorbs a trailing version so
 * "VMware ESXi 7.0.3" yields a single token. Treat the table as versioned
 * configuration - correctness depends on pattern completeness and order.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Category of a protected term, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermCategory {
    /// CVE identifiers (CVE-2025-41225)
    CveId,
    /// Vendor advisory identifiers (VMSA-2025-0010, MSRC-2024-123)
    AdvisoryId,
    /// Known vendor/product vocabulary, with optional trailing version
    Product,
    /// CVSS score ranges (7.0-8.9)
    ScoreRange,
    /// Bare version strings (7.0.3, 2.11.4 build 21203)
    Version,
    /// URLs
    Url,
    /// Email addresses
    Email,
    /// Windows registry keys
    RegistryKey,
    /// Filesystem paths (Windows and Unix)
    FilePath,
    /// IPv4 addresses
    IpAddress,
    /// Hex hash values (MD5 through SHA-256 length)
    HashValue,
    /// Explicit port references ("port 443")
    PortNumber,
    /// Filenames with a known extension
    FileName,
}

impl fmt::Display for TermCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::CveId => "cve_id",
            Self::AdvisoryId => "advisory_id",
            Self::Product => "product",
            Self::ScoreRange => "score_range",
            Self::Version => "version",
            Self::Url => "url",
            Self::Email => "email",
            Self::RegistryKey => "registry_key",
            Self::FilePath => "file_path",
            Self::IpAddress => "ip_address",
            Self::HashValue => "hash_value",
            Self::PortNumber => "port_number",
            Self::FileName => "file_name",
        };
        write!(f, "{}", name)
    }
}

/// One detector rule: a category plus its compiled pattern.
struct Matcher {
    category: TermCategory,
    regex: Regex,
}

/// Vendor names recognized by the product-vocabulary detector.
const VENDORS: &str =
    "VMware|Microsoft|Oracle|Adobe|Cisco|Apple|Google|Amazon|IBM|Dell|HP|Intel|AMD|NVIDIA|Broadcom";

/// Product names recognized by the product-vocabulary detector.
/// Multi-word names must come before their single-word prefixes.
const PRODUCTS: &str = "vCenter\\s+Server|Cloud\\s+Foundation|Telco\\s+Cloud|vCenter|ESXi|\
Workstation|Fusion|Windows|Office|Exchange|SharePoint|Chrome|Firefox|Safari|NSX|Horizon";

// The matcher table. Order is priority: earlier categories claim spans first.
static MATCHERS: Lazy<Vec<Matcher>> = Lazy::new(|| {
    let product_pattern = format!(
        r"(?i)\b(?:(?:{vendors})(?:\s+(?:{products}))*|(?:{products}))(?:\s+v?\d+(?:\.\d+)+(?:\s+build\s+\d+)?)?\b",
        vendors = VENDORS,
        products = PRODUCTS,
    );

    vec![
        Matcher {
            category: TermCategory::CveId,
            regex: Regex::new(r"(?i)\bCVE-\d{4}-\d{4,7}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::AdvisoryId,
            regex: Regex::new(r"\b[A-Z]{2,10}-\d{4}-\d{1,6}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::Product,
            regex: Regex::new(&product_pattern).unwrap(),
        },
        Matcher {
            category: TermCategory::ScoreRange,
            regex: Regex::new(r"\b\d+\.\d+[-\u{2013}]\d+\.\d+\b").unwrap(),
        },
        Matcher {
            category: TermCategory::Version,
            regex: Regex::new(r"(?i)\b\d+(?:\.\d+)+(?:\s+build\s+\d+)?\b").unwrap(),
        },
        Matcher {
            category: TermCategory::Url,
            regex: Regex::new(r"(?i)\bhttps?://[^\s<>\)\]]+").unwrap(),
        },
        Matcher {
            category: TermCategory::Email,
            regex: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::RegistryKey,
            regex: Regex::new(r"\bHKEY_[A-Z_]+\\[^\s]+").unwrap(),
        },
        Matcher {
            category: TermCategory::FilePath,
            regex: Regex::new(r"\b[A-Za-z]:\\[^\s]+\b|/[\w.-]+(?:/[\w.-]+)+\b").unwrap(),
        },
        Matcher {
            category: TermCategory::IpAddress,
            regex: Regex::new(r"\b(?:\d{1,3}\.){3}\d{1,3}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::HashValue,
            regex: Regex::new(r"\b[0-9a-fA-F]{32,64}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::PortNumber,
            regex: Regex::new(r"(?i)\bport\s+\d{1,5}\b").unwrap(),
        },
        Matcher {
            category: TermCategory::FileName,
            regex: Regex::new(
                r"(?i)\b[\w][\w.-]*\.(?:exe|dll|sys|msi|docx|doc|xlsx|pdf|zip|tar|gz|iso|vib|ova|sh|ps1|py|js|jar|conf|cfg|log|json|xml|yaml|yml)\b",
            )
            .unwrap(),
        },
    ]
});

/// One protected term: its token and the original substring.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionEntry {
    /// The placeholder inserted into the text (`[KEEP:0001]`)
    pub token: String,
    /// The original substring the token stands for
    pub original: String,
    /// Which detector claimed the span
    pub category: TermCategory,
}

/// Ordered token-to-original mapping for one protected text block.
///
/// Ephemeral: created immediately before a translation call and consumed
/// immediately after. Tokens are assigned left-to-right over the source
/// text, so entry order matches source order.
#[derive(Debug, Clone, Default)]
pub struct ProtectionMap {
    entries: Vec<ProtectionEntry>,
}

impl ProtectionMap {
    /// Number of protected terms in this block
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block contained no protected terms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in source order
    pub fn entries(&self) -> impl Iterator<Item = &ProtectionEntry> {
        self.entries.iter()
    }

    /// Look up the original text for a token
    pub fn original_for(&self, token: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.token == token)
            .map(|e| e.original.as_str())
    }
}

/// Result of restoring tokens into translated text.
#[derive(Debug, Clone)]
pub struct Restoration {
    /// Text with all found tokens replaced by their originals
    pub text: String,
    /// Tokens that were missing from the translated output. The original
    /// text is never reinserted for these - the block is flagged instead.
    pub missing_tokens: Vec<String>,
}

impl Restoration {
    /// Whether the translator dropped any protection token
    pub fn is_partial(&self) -> bool {
        !self.missing_tokens.is_empty()
    }
}

/// A detected span, internal to the scan.
#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
    category: TermCategory,
}

impl Span {
    fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Whether a candidate span sits inside a larger identifier. A vendor name
/// or version embedded in an email address, URL, registry key, path, or
/// hyphenated filename belongs to the span a later detector will claim, so
/// the vocabulary match must not carve it up.
fn embedded_in_identifier(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    matches!(before, Some('@' | '.' | '/' | '\\' | '-' | '_' | ':'))
        || matches!(after, Some('@' | '-' | '_' | '\\'))
}

/// Detects technical-identifier spans and provides reversible token
/// substitution around an external translation call.
#[derive(Debug, Clone, Default)]
pub struct TermPreserver;

impl TermPreserver {
    pub fn new() -> Self {
        TermPreserver
    }

    /// Scan the text with every detector in priority order and return the
    /// accepted, non-overlapping spans sorted by start position.
    fn scan(&self, text: &str) -> Vec<Span> {
        let mut accepted: Vec<Span> = Vec::new();

        for matcher in MATCHERS.iter() {
            for m in matcher.regex.find_iter(text) {
                let candidate = Span {
                    start: m.start(),
                    end: m.end(),
                    category: matcher.category,
                };
                if matches!(
                    matcher.category,
                    TermCategory::Product | TermCategory::Version
                ) && embedded_in_identifier(text, m.start(), m.end())
                {
                    continue;
                }
                // A span claimed by a higher-priority category wins outright.
                if !accepted.iter().any(|s| s.overlaps(&candidate)) {
                    accepted.push(candidate);
                }
            }
        }

        accepted.sort_by_key(|s| s.start);
        accepted
    }

    /// Replace every detected term with a sequential `[KEEP:NNNN]` token.
    ///
    /// Tokens are numbered left-to-right starting at 0001, so the mapping
    /// order mirrors source order. Applying `restore` to the returned pair
    /// without an intervening translation is a no-op on the original text.
    pub fn protect(&self, text: &str) -> (String, ProtectionMap) {
        let spans = self.scan(text);
        if spans.is_empty() {
            return (text.to_string(), ProtectionMap::default());
        }

        let mut entries = Vec::with_capacity(spans.len());
        for (idx, span) in spans.iter().enumerate() {
            entries.push(ProtectionEntry {
                token: format!("[KEEP:{:04}]", idx + 1),
                original: text[span.start..span.end].to_string(),
                category: span.category,
            });
        }

        // Replace from the end so earlier byte offsets stay valid.
        let mut protected = text.to_string();
        for (span, entry) in spans.iter().zip(entries.iter()).rev() {
            protected.replace_range(span.start..span.end, &entry.token);
        }

        (protected, ProtectionMap { entries })
    }

    /// Replace each token literal in the translated text with its original
    /// substring. Replacement is by exact token match, not position, so a
    /// translator that reordered or repeated tokens is still handled.
    /// Tokens absent from the output are reported, never fabricated.
    pub fn restore(&self, translated: &str, map: &ProtectionMap) -> Restoration {
        let mut text = translated.to_string();
        let mut missing_tokens = Vec::new();

        for entry in map.entries() {
            if text.contains(&entry.token) {
                text = text.replace(&entry.token, &entry.original);
            } else {
                missing_tokens.push(entry.token.clone());
            }
        }

        Restoration {
            text,
            missing_tokens,
        }
    }

    /// All protected substrings in the text, in source order.
    pub fn extract_terms(&self, text: &str) -> Vec<String> {
        self.scan(text)
            .iter()
            .map(|s| text[s.start..s.end].to_string())
            .collect()
    }

    /// Total count of non-whitespace characters covered by protected spans.
    /// Used by the classifier to compute the protected-term coverage ratio;
    /// whitespace is excluded on both sides of that ratio, so spaces inside
    /// a multi-word product match do not inflate it.
    pub fn coverage(&self, text: &str) -> usize {
        self.scan(text)
            .iter()
            .map(|s| {
                text[s.start..s.end]
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .count()
            })
            .sum()
    }

    /// Check that every term detected in the source also appears verbatim
    /// in the translated output.
    pub fn verify_preservation(&self, original: &str, translated: &str) -> bool {
        self.extract_terms(original)
            .iter()
            .all(|term| translated.contains(term.as_str()))
    }
}
