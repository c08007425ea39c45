//! Reading-time estimation

use crate::content::post::Section;

const WORDS_PER_MINUTE: f64 = 200.0;

/// Estimated minutes to read `content` at 200 words per minute.
///
/// Accumulates section by section, rounding the running total up to
/// whole minutes after each one; a section never shares a started
/// minute with the next. Empty content reads in 0 minutes.
pub fn estimate(content: &[Section]) -> u32 {
    let minutes = content.iter().fold(0.0_f64, |acc, section| {
        (acc + section_words(section) as f64 / WORDS_PER_MINUTE).ceil()
    });
    minutes as u32
}

/// Words in a section: heading plus all body fragments, counted as
/// whitespace-separated runs
fn section_words(section: &Section) -> usize {
    let heading = section.heading.split_whitespace().count();
    let body: usize = section
        .body
        .iter()
        .map(|fragment| fragment.text.split_whitespace().count())
        .sum();
    heading + body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::post::TextFragment;

    fn section(heading_words: usize, body_words: &[usize]) -> Section {
        Section {
            heading: "h ".repeat(heading_words).trim_end().to_string(),
            body: body_words
                .iter()
                .map(|n| TextFragment {
                    text: "w ".repeat(*n).trim_end().to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_empty_content_reads_in_zero_minutes() {
        assert_eq!(estimate(&[]), 0);
    }

    #[test]
    fn test_exactly_one_minute() {
        let content = vec![section(0, &[200])];
        assert_eq!(estimate(&content), 1);
    }

    #[test]
    fn test_heading_words_count() {
        assert_eq!(estimate(&[section(10, &[190])]), 1);
        assert_eq!(estimate(&[section(10, &[195])]), 2);
    }

    #[test]
    fn test_each_section_rounds_up() {
        // 150 + 150 words is one piece at 300/200 = 1.5, but every
        // section rounds the running total up
        let content = vec![section(0, &[150]), section(0, &[150])];
        assert_eq!(estimate(&content), 2);
    }

    #[test]
    fn test_accumulation_is_not_a_grand_total() {
        // naive ceil(260 / 200) would be 2
        let content = vec![section(0, &[250]), section(0, &[10])];
        assert_eq!(estimate(&content), 3);
    }

    #[test]
    fn test_body_words_split_on_whitespace_runs() {
        let content = vec![Section {
            heading: "Um  título\tcom   espaços".to_string(),
            body: vec![
                TextFragment {
                    text: "   \n\t  ".to_string(),
                },
                TextFragment {
                    text: "duas palavras".to_string(),
                },
            ],
        }];
        // 4 heading words + 0 + 2 body words, well under a minute
        assert_eq!(estimate(&content), 1);
    }
}
