//! Fragment scanner.
//!
//! Loaded fragments are opaque HTML, but runner and tab elements inside them
//! need live event handlers. The scanner splits a fragment into ordered
//! segments: raw markup injected verbatim, plus structured blocks the
//! components render themselves. Recognition is by the same class markers the
//! original markup uses (`code-runner`, `tab-buttons`, `tab-content`).
//! Malformed blocks degrade to raw markup rather than failing the load.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentDocument {
    pub segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Markup(String),
    Runner(RunnerBlock),
    TabBar(Vec<TabButton>),
    TabPane(TabPane),
}

/// One runner binding scanned out of a fragment: input text, trigger label
/// and the output sink's stable id.
#[derive(Debug, Clone, PartialEq)]
pub struct RunnerBlock {
    pub output_id: String,
    pub initial_code: String,
    pub run_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabButton {
    pub target: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabPane {
    pub id: String,
    pub body: String,
    pub active: bool,
}

static RUNNER_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div\b[^>]*\bclass="[^"]*\bcode-runner\b[^"]*"[^>]*>"#).expect("valid pattern")
});
static TAB_BAR_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div\b[^>]*\bclass="[^"]*\btab-buttons\b[^"]*"[^>]*>"#).expect("valid pattern")
});
static TAB_PANE_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<div\b[^>]*\bclass="[^"]*\btab-content\b[^"]*"[^>]*>"#).expect("valid pattern")
});
static DIV_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?div\b").expect("valid pattern"));
static TEXTAREA: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<textarea\b[^>]*>(.*?)</textarea>").expect("valid pattern"));
static OUTPUT_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(?:div|pre)\b[^>]*\bclass="[^"]*\boutput\b[^"]*"[^>]*>"#).expect("valid pattern")
});
static RUN_BUTTON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)<button\b[^>]*\bclass="[^"]*\brunButton\b[^"]*"[^>]*>(.*?)</button>"#)
        .expect("valid pattern")
});
static TAB_BUTTON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<button\b[^>]*>(.*?)</button>").expect("valid pattern"));
static ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z][a-zA-Z0-9_-]*)\s*=\s*"([^"]*)""#).expect("valid pattern")
});
static ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#x?[0-9a-fA-F]+|[a-zA-Z]+);").expect("valid pattern"));

enum BlockKind {
    Runner,
    TabBar,
    TabPane,
}

pub fn scan_fragment(html: &str) -> FragmentDocument {
    let mut segments = Vec::new();
    let mut rest = html;

    loop {
        let next = [
            (BlockKind::Runner, RUNNER_START.find(rest)),
            (BlockKind::TabBar, TAB_BAR_START.find(rest)),
            (BlockKind::TabPane, TAB_PANE_START.find(rest)),
        ]
        .into_iter()
        .filter_map(|(kind, found)| found.map(|m| (kind, m)))
        .min_by_key(|(_, m)| m.start());

        let Some((kind, start)) = next else {
            push_markup(&mut segments, rest);
            break;
        };

        let Some(close) = balanced_div_end(rest, start.end()) else {
            // Unbalanced markup: give up on structure for the remainder.
            push_markup(&mut segments, rest);
            break;
        };

        push_markup(&mut segments, &rest[..start.start()]);
        let tag = start.as_str();
        let body = &rest[start.end()..close];

        let segment = match kind {
            BlockKind::Runner => parse_runner(body).map(Segment::Runner),
            BlockKind::TabBar => parse_tab_bar(body).map(Segment::TabBar),
            BlockKind::TabPane => Some(Segment::TabPane(parse_tab_pane(tag, body))),
        };
        match segment {
            Some(segment) => segments.push(segment),
            // Block missing its required parts: keep it as plain markup.
            None => push_markup(&mut segments, &rest[start.start()..close + "</div>".len()]),
        }

        rest = &rest[close + "</div>".len()..];
    }

    FragmentDocument { segments }
}

fn push_markup(segments: &mut Vec<Segment>, html: &str) {
    if !html.trim().is_empty() {
        segments.push(Segment::Markup(html.to_string()));
    }
}

/// Byte offset of the `</div>` that closes the tag opened just before
/// `from`, or None when the markup never balances.
fn balanced_div_end(text: &str, from: usize) -> Option<usize> {
    let mut depth = 1usize;
    for token in DIV_TOKEN.find_iter(&text[from..]) {
        if token.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some(from + token.start());
            }
        } else {
            depth += 1;
        }
    }
    None
}

fn parse_runner(body: &str) -> Option<RunnerBlock> {
    let code = TEXTAREA.captures(body)?;
    let initial_code = decode_entities(strip_leading_newline(&code[1]));

    let output_id = OUTPUT_TAG
        .find(body)
        .and_then(|m| attr_value(m.as_str(), "id"))
        .unwrap_or_else(|| format!("runner-output-{}", uuid::Uuid::new_v4()));

    let run_label = RUN_BUTTON
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|label| !label.is_empty());

    Some(RunnerBlock {
        output_id,
        initial_code,
        run_label,
    })
}

fn parse_tab_bar(body: &str) -> Option<Vec<TabButton>> {
    let mut buttons = Vec::new();
    for caps in TAB_BUTTON.captures_iter(body) {
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let start_tag = &whole[..whole.find('>').map(|i| i + 1).unwrap_or(whole.len())];
        let Some(target) = attr_value(start_tag, "data-tab") else {
            continue;
        };
        buttons.push(TabButton {
            target,
            label: caps[1].trim().to_string(),
            active: class_list_contains(start_tag, "active"),
        });
    }
    if buttons.is_empty() {
        None
    } else {
        Some(buttons)
    }
}

fn parse_tab_pane(tag: &str, body: &str) -> TabPane {
    TabPane {
        // A pane without an id can never be targeted; it just never shows.
        id: attr_value(tag, "id").unwrap_or_default(),
        body: body.to_string(),
        active: class_list_contains(tag, "active"),
    }
}

fn attr_value(tag: &str, name: &str) -> Option<String> {
    ATTR.captures_iter(tag)
        .find(|caps| &caps[1] == name)
        .map(|caps| caps[2].to_string())
}

fn class_list_contains(tag: &str, class: &str) -> bool {
    attr_value(tag, "class")
        .map(|classes| classes.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Browsers drop a single newline right after `<textarea>`; match that so
/// scanned initial code equals what the original markup displayed.
fn strip_leading_newline(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let entity = &caps[1];
            match entity {
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "amp" => "&".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "nbsp" => "\u{a0}".to_string(),
                _ => {
                    let parsed = if let Some(hex) = entity
                        .strip_prefix("#x")
                        .or_else(|| entity.strip_prefix("#X"))
                    {
                        u32::from_str_radix(hex, 16).ok()
                    } else if let Some(dec) = entity.strip_prefix('#') {
                        dec.parse::<u32>().ok()
                    } else {
                        None
                    };
                    parsed
                        .and_then(char::from_u32)
                        .map(String::from)
                        .unwrap_or_else(|| caps[0].to_string())
                }
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUNNER_FRAGMENT: &str = r#"
<h2>Counter</h2>
<p>Try it:</p>
<div class="code-runner">
  <textarea spellcheck="false">
let n = 1 &lt; 2
console.log(n)</textarea>
  <button class="runButton">Run</button>
  <div class="output" id="out-counter"></div>
</div>
<p>Done.</p>
"#;

    #[test]
    fn extracts_runner_blocks_between_markup() {
        let document = scan_fragment(RUNNER_FRAGMENT);
        assert_eq!(document.segments.len(), 3);
        assert!(matches!(&document.segments[0], Segment::Markup(html) if html.contains("<h2>")));
        match &document.segments[1] {
            Segment::Runner(block) => {
                assert_eq!(block.output_id, "out-counter");
                assert_eq!(block.initial_code, "let n = 1 < 2\nconsole.log(n)");
                assert_eq!(block.run_label.as_deref(), Some("Run"));
            }
            other => panic!("expected runner segment, got {other:?}"),
        }
        assert!(matches!(&document.segments[2], Segment::Markup(html) if html.contains("Done")));
    }

    #[test]
    fn missing_output_id_gets_a_generated_one() {
        let html = r#"<div class="code-runner"><textarea>1</textarea>
            <button class="runButton">Run</button><div class="output"></div></div>"#;
        let document = scan_fragment(html);
        match &document.segments[0] {
            Segment::Runner(block) => {
                assert!(block.output_id.starts_with("runner-output-"));
            }
            other => panic!("expected runner segment, got {other:?}"),
        }
    }

    #[test]
    fn runner_without_textarea_stays_markup() {
        let html = r#"<div class="code-runner"><p>not really</p></div>"#;
        let document = scan_fragment(html);
        assert_eq!(document.segments.len(), 1);
        assert!(matches!(&document.segments[0], Segment::Markup(_)));
    }

    #[test]
    fn scans_tab_bars_and_panes() {
        let html = r#"
<div class="tab-buttons">
  <button class="tab-button active" data-tab="a">Alpha</button>
  <button class="tab-button" data-tab="b">Beta</button>
</div>
<div id="a" class="tab-content active"><p>first</p></div>
<div id="b" class="tab-content"><p>second</p></div>
"#;
        let document = scan_fragment(html);
        assert_eq!(document.segments.len(), 3);
        match &document.segments[0] {
            Segment::TabBar(buttons) => {
                assert_eq!(buttons.len(), 2);
                assert_eq!(buttons[0].target, "a");
                assert!(buttons[0].active);
                assert_eq!(buttons[1].label, "Beta");
                assert!(!buttons[1].active);
            }
            other => panic!("expected tab bar, got {other:?}"),
        }
        match &document.segments[1] {
            Segment::TabPane(pane) => {
                assert_eq!(pane.id, "a");
                assert!(pane.active);
                assert!(pane.body.contains("first"));
            }
            other => panic!("expected tab pane, got {other:?}"),
        }
    }

    #[test]
    fn nested_divs_inside_a_pane_balance() {
        let html = r#"<div class="tab-content" id="x"><div><div>deep</div></div></div><p>tail</p>"#;
        let document = scan_fragment(html);
        assert_eq!(document.segments.len(), 2);
        match &document.segments[0] {
            Segment::TabPane(pane) => assert_eq!(pane.body, "<div><div>deep</div></div>"),
            other => panic!("expected tab pane, got {other:?}"),
        }
    }

    #[test]
    fn unbalanced_markup_degrades_to_raw() {
        let html = r#"<div class="code-runner"><textarea>1</textarea>"#;
        let document = scan_fragment(html);
        assert_eq!(document.segments.len(), 1);
        assert!(matches!(&document.segments[0], Segment::Markup(_)));
    }

    #[test]
    fn plain_fragments_are_one_markup_segment() {
        let document = scan_fragment("<h2>Title</h2><p>Body</p>");
        assert_eq!(
            document.segments,
            vec![Segment::Markup("<h2>Title</h2><p>Body</p>".into())]
        );
    }

    #[test]
    fn entity_decoding_covers_named_and_numeric() {
        assert_eq!(
            decode_entities("a &lt; b &amp;&amp; c &gt; d &#39;x&#x27;"),
            "a < b && c > d 'x'"
        );
        assert_eq!(decode_entities("&unknown;"), "&unknown;");
    }
}
