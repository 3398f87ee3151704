//! Paragraph readability scoring
//!
//! Scores use the standard published formulas over a heuristic syllable
//! count, so values track common text-statistics tools closely but not
//! exactly.

use std::sync::LazyLock;

use docs_content::lines::split_lines;
use docs_content::markdown::scan_fences;
use docs_schema::ReadabilitySettings;
use regex::Regex;

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase};

static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("link regex is valid"));
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("inline code regex is valid"));
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:[-*+]|\d+[.)])\s").expect("list regex is valid"));

/// A paragraph of prose and the file line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub line: usize,
}

/// Counts the formulas are built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    pub letters: usize,
    /// Words of three or more syllables
    pub polysyllables: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub gunning_fog: f64,
    pub smog_index: f64,
    pub automated_readability_index: f64,
    pub coleman_liau_index: f64,
}

fn is_structural(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('#')
        || trimmed.starts_with('>')
        || trimmed.starts_with('<')
        || trimmed.starts_with('|')
        || trimmed.starts_with("import ")
        || trimmed.starts_with("export ")
        || LIST_ITEM.is_match(line)
}

fn plain_text(markdown: &str) -> String {
    let text = LINK.replace_all(markdown, "$1");
    let text = INLINE_CODE.replace_all(&text, "");
    text.chars()
        .filter(|c| !matches!(c, '*' | '_' | '~'))
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prose paragraphs of the body, excluding code, headings, lists, quotes,
/// tables and HTML/MDX lines.
pub fn paragraphs(body: &str, first_line: usize) -> Vec<Paragraph> {
    let lines = split_lines(body);
    let scan = scan_fences(lines.iter().map(|l| l.text));
    let mut paragraphs = Vec::new();
    let mut current: Option<Paragraph> = None;

    for (idx, (line, role)) in lines.iter().zip(&scan.roles).enumerate() {
        let prose = role.is_prose() && !line.is_blank() && !is_structural(line.text);
        if prose {
            let para = current.get_or_insert_with(|| Paragraph {
                text: String::new(),
                line: first_line + idx,
            });
            if !para.text.is_empty() {
                para.text.push(' ');
            }
            para.text.push_str(line.text.trim());
        } else if let Some(done) = current.take() {
            paragraphs.push(done);
        }
    }
    paragraphs.extend(current);

    for paragraph in &mut paragraphs {
        paragraph.text = plain_text(&paragraph.text);
    }
    paragraphs
}

/// Heuristic English syllable count.
pub fn syllables(word: &str) -> usize {
    let word: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if word.is_empty() {
        return 0;
    }
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &word {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    let len = word.len();
    if len > 2 && word[len - 1] == 'e' && word[len - 2] != 'l' && !is_vowel(word[len - 2]) {
        count -= 1;
    }
    count.max(1)
}

pub fn stats(text: &str) -> TextStats {
    let mut stats = TextStats::default();
    for word in text.split_whitespace() {
        let letters = word.chars().filter(|c| c.is_alphanumeric()).count();
        if letters == 0 {
            continue;
        }
        stats.words += 1;
        stats.letters += letters;
        let syllables = syllables(word);
        stats.syllables += syllables;
        if syllables >= 3 {
            stats.polysyllables += 1;
        }
    }
    stats.sentences = text
        .split(['.', '!', '?'])
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .count()
        .max(1);
    stats
}

pub fn scores(stats: &TextStats) -> Option<Scores> {
    if stats.words == 0 {
        return None;
    }
    let words = stats.words as f64;
    let sentences = stats.sentences as f64;
    let words_per_sentence = words / sentences;
    let syllables_per_word = stats.syllables as f64 / words;
    let letters_per_100 = stats.letters as f64 / words * 100.0;
    let sentences_per_100 = sentences / words * 100.0;

    Some(Scores {
        flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
        gunning_fog: 0.4 * (words_per_sentence + 100.0 * stats.polysyllables as f64 / words),
        smog_index: 1.043 * (stats.polysyllables as f64 * (30.0 / sentences)).sqrt() + 3.1291,
        automated_readability_index: 4.71 * (stats.letters as f64 / words)
            + 0.5 * words_per_sentence
            - 21.43,
        coleman_liau_index: 0.0588 * letters_per_100 - 0.296 * sentences_per_100 - 15.8,
    })
}

/// Threshold failures for one paragraph, as readable fragments.
pub fn failures(scores: &Scores, settings: &ReadabilitySettings) -> Vec<String> {
    let mut failures = Vec::new();
    if let Some(min) = settings.flesch_reading_ease_min {
        if scores.flesch_reading_ease < min {
            failures.push(format!(
                "Flesch Reading Ease {:.1} is below {min}",
                scores.flesch_reading_ease
            ));
        }
    }
    let maxima = [
        ("Flesch-Kincaid grade", scores.flesch_kincaid_grade, settings.flesch_kincaid_grade_max),
        ("Gunning Fog", scores.gunning_fog, settings.gunning_fog_max),
        ("SMOG", scores.smog_index, settings.smog_index_max),
        ("ARI", scores.automated_readability_index, settings.automated_readability_index_max),
        ("Coleman-Liau", scores.coleman_liau_index, settings.coleman_liau_index_max),
    ];
    for (name, value, max) in maxima {
        if let Some(max) = max {
            if value > max {
                failures.push(format!("{name} {value:.1} exceeds {max}"));
            }
        }
    }
    failures
}

pub fn check(doc: &DocumentRecord, settings: &ReadabilitySettings) -> Vec<Issue> {
    paragraphs(doc.body(), doc.body_line)
        .into_iter()
        .filter(|p| p.text.chars().count() >= settings.min_paragraph_length)
        .filter_map(|p| {
            let scores = scores(&stats(&p.text))?;
            let failures = failures(&scores, settings);
            (!failures.is_empty()).then(|| {
                Issue::warning(
                    Phase::Readability,
                    format!("paragraph is hard to read: {}", failures.join("; ")),
                )
                .at_line(Some(p.line))
            })
        })
        .collect()
}
