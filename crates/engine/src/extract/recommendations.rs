use super::contains_any;

pub const MAX_RECOMMENDATIONS: usize = 5;

/// Returned when no stage finds anything in the text.
pub const CANNED_RECOMMENDATIONS: [&str; MAX_RECOMMENDATIONS] = [
    "Review the full competitive analysis produced by the agents",
    "Implement the personalization strategies identified in the analysis",
    "Develop online sales channels following the recommendations",
    "Establish the suggested tracking metrics",
    "Execute the proposed 90-day action plan",
];

const SECTION_HEADERS: &[&str] = &["strategic recommendations", "recomendaciones estratégicas"];

const NUMBERED_MARKERS: &[&str] = &["1.", "2.", "3.", "4.", "5."];
const LIST_MARKERS: &[&str] = &["1.", "2.", "3.", "4.", "5.", "-", "•"];

const ACTION_VERBS: &[&str] = &[
    "prioritize",
    "implement",
    "develop",
    "establish",
    "maintain",
    "priorizar",
    "implementar",
    "desarrollar",
    "establecer",
    "mantener",
];

/// Section items must be longer than this to count.
const MIN_SECTION_ITEM_CHARS: usize = 20;
/// A plain line longer than this ends the recommendations section.
const SECTION_BREAK_CHARS: usize = 50;
/// Action-verb lines must fall strictly inside this range.
const ACTION_LINE_CHARS: (usize, usize) = (30, 200);
/// Numbered lines outside a section must be longer than this.
const MIN_NUMBERED_LINE_CHARS: usize = 30;

/// Pull up to five recommendations out of free text.
///
/// Stages run in order and a later stage only runs when the earlier ones
/// found nothing: long items in a "strategic recommendations" section, then
/// lines with action verbs, then any numbered line, then the short section
/// items, then [`CANNED_RECOMMENDATIONS`]. The result always holds between
/// one and five entries.
pub fn extract_recommendations(text: Option<&str>) -> Vec<String> {
    let text = text.unwrap_or_default();

    let Section {
        long_items: mut found,
        short_items,
    } = from_section(text);
    if found.is_empty() {
        found = from_action_verbs(text);
    }
    if found.is_empty() {
        found = from_numbered_lines(text);
    }
    if found.is_empty() {
        found = short_items;
    }
    if found.is_empty() {
        found = CANNED_RECOMMENDATIONS.iter().map(|r| r.to_string()).collect();
    }

    found.truncate(MAX_RECOMMENDATIONS);
    found
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn strip_marker<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    markers
        .iter()
        .find_map(|m| line.strip_prefix(m))
        .map(str::trim)
}

/// Items listed under a recommendations header, split by length.
#[derive(Default)]
struct Section {
    long_items: Vec<String>,
    short_items: Vec<String>,
}

fn from_section(text: &str) -> Section {
    let mut section = Section::default();
    if !contains_any(&text.to_lowercase(), SECTION_HEADERS) {
        return section;
    }

    let mut in_section = false;
    for line in text.lines().map(str::trim) {
        if contains_any(&line.to_lowercase(), SECTION_HEADERS) {
            in_section = true;
            continue;
        }
        if !in_section {
            continue;
        }

        if let Some(item) = strip_marker(line, LIST_MARKERS) {
            if char_len(item) > MIN_SECTION_ITEM_CHARS {
                section.long_items.push(item.to_string());
            } else if item.chars().any(char::is_alphanumeric) {
                // rules like `---` strip to `--`
                section.short_items.push(item.to_string());
            }
        } else if !line.is_empty()
            && !line.starts_with(|c: char| c.is_ascii_digit())
            && char_len(line) > SECTION_BREAK_CHARS
        {
            break;
        }
    }

    section
}

fn from_action_verbs(text: &str) -> Vec<String> {
    let (min, max) = ACTION_LINE_CHARS;
    text.lines()
        .map(str::trim)
        .filter(|line| contains_any(&line.to_lowercase(), ACTION_VERBS))
        .filter(|line| {
            let len = char_len(line);
            len > min && len < max
        })
        .map(String::from)
        .collect()
}

fn from_numbered_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| char_len(line) > MIN_NUMBERED_LINE_CHARS)
        .filter_map(|line| strip_marker(line, NUMBERED_MARKERS))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_section_short_items() {
        let text = "Recomendaciones Estratégicas:\n1. Do X\n2. Do Y";
        assert_eq!(extract_recommendations(Some(text)), vec!["Do X", "Do Y"]);
    }

    #[test]
    fn test_short_section_items_yield_to_action_verbs() {
        let text = "Strategic Recommendations\n- Pricing\n- Staff\n\n\
                    We recommend you implement a loyalty program for contractors in Texas.";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec!["We recommend you implement a loyalty program for contractors in Texas."]
        );
    }

    #[test]
    fn test_markdown_rule_is_not_an_item() {
        let text = "\
Recomendaciones Estratégicas
---
**Implementar** un CRM para seguir a los clientes profesionales de la región
";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec!["**Implementar** un CRM para seguir a los clientes profesionales de la región"]
        );
    }

    #[test]
    fn test_section_keeps_long_items_and_strips_markers() {
        let text = "\
## Strategic Recommendations
1. Open a second warehouse near the Dallas distribution hub
- Launch a loyalty program for professional contractors
• Short one
2. Renegotiate supplier terms for seasonal garden products
";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec![
                "Open a second warehouse near the Dallas distribution hub",
                "Launch a loyalty program for professional contractors",
                "Renegotiate supplier terms for seasonal garden products",
            ]
        );
    }

    #[test]
    fn test_section_ends_at_long_plain_line() {
        let text = "\
Strategic recommendations
1. Expand the e-commerce catalogue to cover all store SKUs
This paragraph starts the next section and is clearly longer than fifty characters.
- Hire a regional marketing manager for the Midwest stores
";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec!["Expand the e-commerce catalogue to cover all store SKUs"]
        );
    }

    #[test]
    fn test_action_verb_stage() {
        let text = "\
Summary of the market.
We should implement a same-day delivery service in the metro area.
Develop.
Establish partnerships with local contractors and builders associations.
";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec![
                "We should implement a same-day delivery service in the metro area.",
                "Establish partnerships with local contractors and builders associations.",
            ]
        );
    }

    #[test]
    fn test_numbered_stage_strips_two_char_prefix() {
        let text = "\
1. Open three new locations in suburban growth corridors
2. Short
6. Not a recognised marker even though this line is long enough
";
        assert_eq!(
            extract_recommendations(Some(text)),
            vec!["Open three new locations in suburban growth corridors"]
        );
    }

    #[test]
    fn test_canned_fallback() {
        let expected: Vec<String> = CANNED_RECOMMENDATIONS.iter().map(|s| s.to_string()).collect();
        assert_eq!(extract_recommendations(None), expected);
        assert_eq!(extract_recommendations(Some("")), expected);
        assert_eq!(extract_recommendations(Some("nothing useful here")), expected);
    }

    #[test]
    fn test_truncated_to_five() {
        let lines: Vec<String> = (0..8)
            .map(|i| format!("Implement initiative number {} across every regional store", i))
            .collect();
        let text = lines.join("\n");
        let recs = extract_recommendations(Some(&text));
        assert_eq!(recs.len(), MAX_RECOMMENDATIONS);
        assert!(recs[0].contains("number 0"));
    }

    #[test]
    fn test_always_between_one_and_five() {
        let inputs = [
            None,
            Some(""),
            Some("\n\n\n"),
            Some("Recomendaciones estratégicas:\n\n"),
            Some("1.\n2.\n-\n•"),
            Some("ñandú • — 🚀 多字节文本"),
        ];
        for input in inputs {
            let recs = extract_recommendations(input);
            assert!(!recs.is_empty() && recs.len() <= MAX_RECOMMENDATIONS, "{:?}", input);
        }
    }
}
