/// Server-rendered panel fragments.
///
/// A fragment is the whole panel as markup: pagination controls, counters
/// and a content table. Replacing the panel means replacing its `Fragment`,
/// so the pagination state travels inside the markup the server returns.
///
/// Attributes read:
/// - `id="table-buttons"` with `page` (current 0-based index) and
///   `info-source` (request base the next index is appended to).
/// - `class="counter"` elements with `data-count` (target) and `format`
///   (`regular` | `space`); elements without `data-count` are ignored.
use crate::error::{PanelError, Result};
use crate::format::FormatKind;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Id of the element that carries the pagination attributes.
pub const CONTROLS_ID: &str = "table-buttons";

fn open_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"<([a-zA-Z][a-zA-Z0-9-]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
            .expect("valid tag regex")
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][a-zA-Z0-9_:.-]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
            .expect("valid attribute regex")
    })
}

fn row_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr\s*>").expect("valid row regex"))
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)<(t[hd])\b[^>]*>(.*?)</t[hd]\s*>").expect("valid cell regex")
    })
}

fn any_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid strip regex"))
}

/// Pagination attributes of the controls container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Current page, 0-based.
    pub page: u32,
    /// Base string the requested page index is appended to.
    pub info_source: String,
}

/// A counter element as declared in markup.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    /// Value the counter animates to.
    pub target: f64,
    pub kind: FormatKind,
    /// Text the server rendered inside the element.
    pub text: String,
}

/// One `<tr>` of the content table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    /// True when every cell is a `<th>`.
    pub header: bool,
}

/// A parsed panel fragment.
#[derive(Debug, Clone)]
pub struct Fragment {
    markup: String,
    controls: Option<PaginationState>,
    counters: Vec<CounterSpec>,
    rows: Vec<TableRow>,
}

impl Fragment {
    /// Parse a fragment.
    ///
    /// Malformed declarative attributes (a non-numeric `page` or
    /// `data-count`, an unknown `format`) are `InvalidArgument`.
    pub fn parse(markup: impl Into<String>) -> Result<Self> {
        let markup = markup.into();
        let mut controls = None;
        let mut counters = Vec::new();

        for tag in open_tag_re().captures_iter(&markup) {
            let attrs = parse_attrs(tag.get(2).map_or("", |m| m.as_str()));

            if controls.is_none() && attrs.get("id").map(String::as_str) == Some(CONTROLS_ID) {
                controls = Some(parse_controls(&attrs)?);
            }

            let is_counter = attrs
                .get("class")
                .is_some_and(|class| class.split_whitespace().any(|c| c == "counter"));
            if let (true, Some(count)) = (is_counter, attrs.get("data-count")) {
                let end = tag.get(0).map_or(0, |m| m.end());
                let inner = &markup[end..];
                let text_end = inner.find('<').unwrap_or(inner.len());
                counters.push(parse_counter(count, attrs.get("format"), &inner[..text_end])?);
            }
        }

        let rows = parse_rows(&markup);

        Ok(Self {
            markup,
            controls,
            counters,
            rows,
        })
    }

    /// The raw markup.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Pagination attributes, if the fragment has controls.
    pub fn controls(&self) -> Option<&PaginationState> {
        self.controls.as_ref()
    }

    pub fn counters(&self) -> &[CounterSpec] {
        &self.counters
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }
}

fn parse_controls(attrs: &HashMap<String, String>) -> Result<PaginationState> {
    let page_attr = attrs.get("page").ok_or_else(|| {
        PanelError::invalid_argument(format!("#{CONTROLS_ID} has no page attribute"))
    })?;
    let page = page_attr.trim().parse::<u32>().map_err(|_| {
        PanelError::invalid_argument(format!(
            "#{CONTROLS_ID} page must be a non-negative integer, got {page_attr:?}"
        ))
    })?;
    let info_source = attrs.get("info-source").cloned().ok_or_else(|| {
        PanelError::invalid_argument(format!("#{CONTROLS_ID} has no info-source attribute"))
    })?;
    Ok(PaginationState { page, info_source })
}

fn parse_counter(count: &str, format: Option<&String>, text: &str) -> Result<CounterSpec> {
    let target = count
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            PanelError::invalid_argument(format!("counter data-count is not a number: {count:?}"))
        })?;
    let kind = format
        .ok_or_else(|| PanelError::invalid_argument("counter has no format attribute"))?
        .parse::<FormatKind>()?;
    Ok(CounterSpec {
        target,
        kind,
        text: collapse_whitespace(&decode_entities(text)),
    })
}

fn parse_attrs(raw: &str) -> HashMap<String, String> {
    attr_re()
        .captures_iter(raw)
        .filter_map(|c| {
            let name = c.get(1)?.as_str().to_ascii_lowercase();
            let value = c.get(2).or_else(|| c.get(3)).or_else(|| c.get(4))?;
            Some((name, decode_entities(value.as_str())))
        })
        .collect()
}

fn parse_rows(markup: &str) -> Vec<TableRow> {
    row_re()
        .captures_iter(markup)
        .filter_map(|row| {
            let body = row.get(1)?.as_str();
            let mut header = true;
            let cells: Vec<String> = cell_re()
                .captures_iter(body)
                .filter_map(|cell| {
                    header &= cell.get(1)?.as_str().eq_ignore_ascii_case("th");
                    Some(cell_text(cell.get(2)?.as_str()))
                })
                .collect();
            if cells.is_empty() {
                None
            } else {
                Some(TableRow { cells, header })
            }
        })
        .collect()
}

/// Visible text of a cell: tags dropped, entities decoded, whitespace collapsed.
fn cell_text(inner: &str) -> String {
    let stripped = any_tag_re().replace_all(inner, " ");
    collapse_whitespace(&decode_entities(&stripped))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        <div class="card">
          <span class="counter" data-count="1234567" format="regular">0</span>
          <span class="counter big" data-count="2048" format="space">1,024</span>
          <span class="counter">not animated</span>
          <table>
            <tr><th>Key</th><th>Hits</th></tr>
            <tr><td><a href="/k/a">logs/a.gz</a></td><td>12</td></tr>
            <tr><td>tom &amp; jerry</td><td> 3 </td></tr>
          </table>
          <div id="table-buttons" page="3" info-source="/dashboard/logs?page=">
            <button id="table-previous">Previous</button>
            <button id="table-next">Next</button>
          </div>
        </div>"#;

    #[test]
    fn test_parse_controls() {
        let f = Fragment::parse(SAMPLE).unwrap();
        let controls = f.controls().unwrap();
        assert_eq!(controls.page, 3);
        assert_eq!(controls.info_source, "/dashboard/logs?page=");
    }

    #[test]
    fn test_parse_counters_skips_those_without_target() {
        let f = Fragment::parse(SAMPLE).unwrap();
        assert_eq!(f.counters().len(), 2);
        assert_eq!(f.counters()[0].target, 1_234_567.0);
        assert_eq!(f.counters()[0].kind, FormatKind::Regular);
        assert_eq!(f.counters()[0].text, "0");
        assert_eq!(f.counters()[1].kind, FormatKind::Space);
        assert_eq!(f.counters()[1].text, "1,024");
    }

    #[test]
    fn test_parse_rows() {
        let f = Fragment::parse(SAMPLE).unwrap();
        let rows = f.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].header);
        assert_eq!(rows[0].cells, vec!["Key", "Hits"]);
        assert!(!rows[1].header);
        assert_eq!(rows[1].cells, vec!["logs/a.gz", "12"]);
        assert_eq!(rows[2].cells, vec!["tom & jerry", "3"]);
    }

    #[test]
    fn test_fragment_without_controls() {
        let f = Fragment::parse("<p>nothing to page</p>").unwrap();
        assert!(f.controls().is_none());
        assert!(f.counters().is_empty());
        assert!(f.rows().is_empty());
    }

    #[test]
    fn test_bad_page_attribute() {
        let err = Fragment::parse(r#"<div id="table-buttons" page="-1" info-source="/p/">"#)
            .unwrap_err();
        assert!(matches!(err, PanelError::InvalidArgument(_)));
        assert!(Fragment::parse(r#"<div id="table-buttons" info-source="/p/">"#).is_err());
        assert!(Fragment::parse(r#"<div id="table-buttons" page="0">"#).is_err());
    }

    #[test]
    fn test_unknown_counter_format_rejects_fragment() {
        let err = Fragment::parse(r#"<b class="counter" data-count="5" format="percent">0</b>"#)
            .unwrap_err();
        assert!(matches!(err, PanelError::InvalidArgument(_)));
        assert!(Fragment::parse(r#"<b class="counter" data-count="x" format="regular">0</b>"#)
            .is_err());
        assert!(Fragment::parse(r#"<b class="counter" data-count="5">0</b>"#).is_err());
    }

    #[test]
    fn test_single_quoted_attributes() {
        let f = Fragment::parse("<div id='table-buttons' page='0' info-source='/x?p='></div>")
            .unwrap();
        assert_eq!(f.controls().unwrap().info_source, "/x?p=");
    }

    #[test]
    fn test_quoted_angle_bracket_stays_inside_tag() {
        let f = Fragment::parse(
            r#"<span title="a > b" class="counter" data-count="7" format="regular">0</span>
               <div data-hint='x>y' id="table-buttons" page="1" info-source="/q?p="></div>"#,
        )
        .unwrap();
        assert_eq!(f.counters().len(), 1);
        assert_eq!(f.counters()[0].text, "0");
        assert_eq!(f.controls().unwrap().page, 1);
    }
}
