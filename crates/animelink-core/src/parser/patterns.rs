//! # Pattern Library
//!
//! Every regular expression the engine relies on lives here, so the naming
//! rules can be audited in one place. The other parser components only call
//! the predicates and extractors exposed by [`PatternLibrary`].
//!
//! The `regex` crate has no look-around, so the trailing context that release
//! names require (`]`, whitespace or `.` after a bracketed episode; a subtitle
//! extension after a language code) is matched and consumed instead. Only the
//! first match is ever used, which makes the two forms equivalent.

use regex::Regex;

use crate::error::Result;

/// Subtitle extensions that may carry a language code before them.
pub const SUBTITLE_EXTENSIONS: &[&str] = &["ass", "srt", "vtt", "sub", "ssa"];

/// Pre-compiled matchers for release names.
///
/// Cloning is cheap: compiled regexes are reference counted internally.
#[derive(Debug, Clone)]
pub struct PatternLibrary {
    re_bracket: Regex,
    re_episode_bracket: Regex,
    re_episode_sxxexx: Regex,
    re_episode_japanese: Regex,
    re_episode_range: Regex,
    re_season_word: Regex,
    re_season_sxx: Regex,
    re_season_japanese: Regex,
    re_special: Regex,
    re_language: Regex,
    re_subtitle_ext: Regex,
    re_leading_separators: Regex,
}

impl PatternLibrary {
    /// Compiles the full pattern set.
    ///
    /// # Errors
    ///
    /// Returns `AnimelinkError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        let subtitle_exts = SUBTITLE_EXTENSIONS.join("|");
        Ok(Self {
            re_bracket: Regex::new(r"\[(.*?)\]")?,
            re_episode_bracket: Regex::new(r"[\s\-\[]([0-9]{2,3})[\]\s.]")?,
            re_episode_sxxexx: Regex::new(r"S[0-9]{1,2}E([0-9]{1,3})")?,
            re_episode_japanese: Regex::new(r"第([0-9]{1,3})話")?,
            re_episode_range: Regex::new(r"[0-9]{1,2}\s*-\s*[0-9]{1,3}")?,
            re_season_word: Regex::new(r"(?i)Season\s+([0-9]{1,2})")?,
            re_season_sxx: Regex::new(r"S([0-9]{1,2})(?:E[0-9]+)?")?,
            re_season_japanese: Regex::new(r"第([0-9]{1,2})期")?,
            re_special: Regex::new(r"(?i)(SPs?|OVA|OAD|映像特典|特典|Specials?|Extras?|Bonus)")?,
            re_language: Regex::new(&format!(
                r"\.([A-Za-z]{{2,4}}(?:-[A-Za-z]{{2,4}})?(?:-[A-Za-z]{{4}})?)\.(?:{subtitle_exts})$"
            ))?,
            re_subtitle_ext: Regex::new(&format!(r"\.(?:{subtitle_exts})$"))?,
            re_leading_separators: Regex::new(r"^[-\s]+")?,
        })
    }

    /// Returns the contents of every `[...]` section, left to right.
    ///
    /// Sections are non-greedy: `[a][b]` yields `a` and `b`, never `a][b`.
    pub fn bracket_sections<'a>(&self, input: &'a str) -> Vec<&'a str> {
        self.re_bracket
            .captures_iter(input)
            .filter_map(|c| c.get(1).map(|m| m.as_str()))
            .collect()
    }

    /// Matches a 2-3 digit episode such as ` 08.`, `-12 ` or `[08]`.
    pub fn episode_bracket(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_episode_bracket, input)
    }

    /// Matches the episode half of `S02E23`.
    pub fn episode_sxxexx(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_episode_sxxexx, input)
    }

    /// Matches `第08話`.
    pub fn episode_japanese(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_episode_japanese, input)
    }

    /// Returns `true` if the text contains an episode range like `01-12`.
    pub fn is_episode_range(&self, input: &str) -> bool {
        self.re_episode_range.is_match(input)
    }

    /// Matches `Season 2` (case-insensitive).
    pub fn season_word(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_season_word, input)
    }

    /// Matches the season half of `S02` or `S02E23`.
    pub fn season_sxx(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_season_sxx, input)
    }

    /// Matches `第2期`.
    pub fn season_japanese(&self, input: &str) -> Option<u32> {
        capture_number(&self.re_season_japanese, input)
    }

    /// Returns `true` if the text contains a special-content marker
    /// (`SPs`, `OVA`, `OAD`, `映像特典`, `特典`, `Specials`, `Extras`, `Bonus`).
    ///
    /// The match is case-insensitive and unanchored.
    pub fn is_special_content(&self, input: &str) -> bool {
        self.re_special.is_match(input)
    }

    /// Returns `true` if the name ends in a subtitle extension.
    pub fn has_subtitle_extension(&self, input: &str) -> bool {
        self.re_subtitle_ext.is_match(input)
    }

    /// Extracts the language code right before a trailing subtitle extension,
    /// e.g. `zh-TW` from `file.zh-TW.srt`.
    pub fn language_code<'a>(&self, input: &'a str) -> Option<&'a str> {
        self.re_language
            .captures(input)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// Removes leading dashes and whitespace.
    pub fn strip_leading_separators<'a>(&self, input: &'a str) -> &'a str {
        match self.re_leading_separators.find(input) {
            Some(m) => &input[m.end()..],
            None => input,
        }
    }
}

fn capture_number(re: &Regex, input: &str) -> Option<u32> {
    re.captures(input).and_then(|c| c[1].parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patterns() -> PatternLibrary {
        PatternLibrary::new().unwrap()
    }

    #[test]
    fn bracket_sections_are_non_greedy_and_ordered() {
        let p = patterns();
        assert_eq!(
            p.bracket_sections("[GroupA&GroupB] Show Title [01-12][BDRip]"),
            vec!["GroupA&GroupB", "01-12", "BDRip"]
        );
        assert!(p.bracket_sections("No Brackets Here").is_empty());
        assert_eq!(p.bracket_sections("[] empty"), vec![""]);
    }

    #[test]
    fn episode_bracket_needs_delimiters_on_both_sides() {
        let p = patterns();
        assert_eq!(p.episode_bracket("[Group] Show [08].mkv"), Some(8));
        assert_eq!(p.episode_bracket("[Group] Show - 12 [1080p].mkv"), Some(12));
        assert_eq!(p.episode_bracket("Show -108.mkv"), Some(108));
        // a single digit or four digits are not episodes
        assert_eq!(p.episode_bracket("Show [8].mkv"), None);
        assert_eq!(p.episode_bracket("Show [2024].mkv"), None);
        // trailing context must follow immediately
        assert_eq!(p.episode_bracket("Show 12v2.mkv"), None);
    }

    #[test]
    fn episode_bracket_prefers_three_digits() {
        let p = patterns();
        assert_eq!(p.episode_bracket("Show [123].mkv"), Some(123));
    }

    #[test]
    fn episode_sxxexx_and_japanese() {
        let p = patterns();
        assert_eq!(p.episode_sxxexx("Tower.of.God.S02E23.mkv"), Some(23));
        assert_eq!(p.episode_sxxexx("Show.S1E5.mkv"), Some(5));
        assert_eq!(p.episode_sxxexx("show.s02e23.mkv"), None);
        assert_eq!(p.episode_japanese("[Snow-Raws] ばらかもん 第08話.mkv"), Some(8));
        assert_eq!(p.episode_japanese("ばらかもん 08話.mkv"), None);
    }

    #[test]
    fn episode_range_detection() {
        let p = patterns();
        assert!(p.is_episode_range("01-12"));
        assert!(p.is_episode_range("1 - 100"));
        assert!(p.is_episode_range("Vol.01-03"));
        assert!(!p.is_episode_range("BDRip"));
        assert!(!p.is_episode_range("1080p"));
    }

    #[test]
    fn season_patterns() {
        let p = patterns();
        assert_eq!(p.season_word("Series Name Season 2"), Some(2));
        assert_eq!(p.season_word("series name SEASON 12"), Some(12));
        assert_eq!(p.season_word("Season2"), None);
        assert_eq!(p.season_sxx("Tower.of.God.S02E23.mkv"), Some(2));
        assert_eq!(p.season_sxx("Golden Kamuy S3"), Some(3));
        assert_eq!(p.season_sxx("Regular Series"), None);
        assert_eq!(p.season_japanese("ゆるキャン△ 第2期"), Some(2));
    }

    #[test]
    fn special_content_vocabulary() {
        let p = patterns();
        for marker in ["SPs", "SP", "OVA", "oad", "映像特典", "特典", "Specials", "extras", "BONUS"] {
            assert!(p.is_special_content(marker), "failed for marker: {marker}");
        }
        assert!(p.is_special_content("[Group] Show [OVA][1080p].mkv"));
        assert!(!p.is_special_content("regular_episode.mkv"));
    }

    #[test]
    fn language_code_requires_trailing_subtitle_extension() {
        let p = patterns();
        assert_eq!(p.language_code("file.zh-TW.srt"), Some("zh-TW"));
        assert_eq!(p.language_code("file.JPTC.ass"), Some("JPTC"));
        assert_eq!(p.language_code("file.zh-Hans.vtt"), Some("zh-Hans"));
        assert_eq!(p.language_code("file.en-US-Latn.ssa"), Some("en-US-Latn"));
        assert_eq!(p.language_code("file.zh-TW.mkv"), None);
        assert_eq!(p.language_code("file.srt"), None);
        assert_eq!(p.language_code("file.mp4"), None);
    }

    #[test]
    fn subtitle_extension_is_anchored() {
        let p = patterns();
        assert!(p.has_subtitle_extension("a.ass"));
        assert!(!p.has_subtitle_extension("a.ass.bak"));
        assert!(!p.has_subtitle_extension("a.mkv"));
        for ext in SUBTITLE_EXTENSIONS {
            assert!(p.has_subtitle_extension(&format!("a.{ext}")), "failed for ext: {ext}");
            assert_eq!(p.language_code(&format!("a.en.{ext}")), Some("en"));
        }
    }

    #[test]
    fn leading_separators_are_stripped() {
        let p = patterns();
        assert_eq!(p.strip_leading_separators(" - Show"), "Show");
        assert_eq!(p.strip_leading_separators("Show - Title"), "Show - Title");
    }
}
