//! Wrap engine tests.

#[cfg(test)]
mod wrap_tests {
    use super::super::*;

    fn mono(text: &str) -> f32 {
        text.chars().count() as f32
    }

    /// Per-character advances roughly shaped like a proportional UI font.
    fn proportional(text: &str) -> f32 {
        text.chars()
            .map(|ch| match ch {
                ' ' | 'i' | 'l' => 3.0,
                'r' => 4.0,
                's' => 5.0,
                'm' | 'w' => 9.0,
                _ => 6.0,
            })
            .sum()
    }

    fn rows(text: &str, width: f32, mode: WrapMode) -> Vec<(&str, usize)> {
        wrap_line(text, width, mode, mono)
    }

    #[test]
    fn segments_split_on_every_line_ending() {
        let text = "ab\ncd\ref\r\ngh\r\r\n\n\r";
        let starts: Vec<(usize, usize)> = segment_offsets(text)
            .iter()
            .map(|offsets| (offsets[0], offsets[offsets.len() - 1]))
            .collect();
        assert_eq!(
            starts,
            [(0, 2), (3, 5), (6, 8), (10, 12), (13, 13), (15, 15), (16, 16)]
        );
        assert_eq!(segment_offsets(""), vec![vec![0]]);
        assert_eq!(segment_offsets("a\n"), vec![vec![0, 1]]);
    }

    #[test]
    fn word_wrap_breaks_at_boundaries() {
        struct Case {
            text: &'static str,
            want: Vec<(&'static str, usize)>,
        }

        let cases = [
            Case {
                text: "01234 678",
                want: vec![("01234", 0), ("678", 6)],
            },
            Case {
                text: "0123  678",
                want: vec![("0123", 0), ("678", 6)],
            },
            Case {
                text: "012.45678",
                want: vec![("012.", 0), ("45678", 4)],
            },
            Case {
                text: "01 34",
                want: vec![("01 34", 0)],
            },
            Case {
                text: "0123456789",
                want: vec![("01234", 0), ("56789", 5)],
            },
            Case {
                text: "ab\ncd ef",
                want: vec![("ab", 0), ("cd ef", 3)],
            },
        ];

        for case in cases {
            assert_eq!(rows(case.text, 5.0, WrapMode::Word), case.want, "text: {:?}", case.text);
        }
    }

    #[test]
    fn break_mode_splits_at_last_fitting_character() {
        assert_eq!(
            rows("01234 678", 5.0, WrapMode::Break),
            vec![("01234", 0), (" 678", 5)]
        );
        assert_eq!(
            rows("0123456789ab", 5.0, WrapMode::Break),
            vec![("01234", 0), ("56789", 5), ("ab", 10)]
        );
    }

    #[test]
    fn empty_text_yields_one_empty_row_in_every_mode() {
        for mode in [WrapMode::Off, WrapMode::Break, WrapMode::Word] {
            assert_eq!(rows("", 5.0, mode), vec![("", 0)], "mode: {}", mode);
        }
    }

    #[test]
    fn off_mode_only_breaks_at_line_endings() {
        assert_eq!(
            rows("a very long line\r\nb\rc\n", 1.0, WrapMode::Off),
            vec![("a very long line", 0), ("b", 18), ("c", 20)]
        );
    }

    #[test]
    fn off_mode_is_idempotent() {
        let text = "first line\nsecond\r\n\rthird";
        let once = rows(text, 3.0, WrapMode::Off);
        for (fragment, offset) in &once {
            assert_eq!(&text[*offset..*offset + fragment.len()], *fragment);
            assert_eq!(rows(fragment, 3.0, WrapMode::Off), vec![(*fragment, 0)]);
        }
        let joined: Vec<&str> = once.iter().map(|(fragment, _)| *fragment).collect();
        assert_eq!(joined, ["first line", "second", "", "third"]);
    }

    #[test]
    fn proportional_lorem_ipsum_at_width_forty() {
        assert_eq!(
            wrap_line("Lorem ipsum", 40.0, WrapMode::Word, proportional),
            vec![("Lorem", 0), ("ipsum", 6)]
        );
        assert_eq!(
            wrap_line("Lorem ipsum", 40.0, WrapMode::Break, proportional),
            vec![("Lorem i", 0), ("psum", 7)]
        );
    }

    #[test]
    fn multibyte_text_uses_byte_offsets() {
        assert_eq!(
            rows("h\u{e9}llo w\u{f6}rld", 5.0, WrapMode::Word),
            vec![("h\u{e9}llo", 0), ("w\u{f6}rld", 7)]
        );
    }

    #[test]
    fn width_narrower_than_one_character_still_progresses() {
        assert_eq!(
            rows("abc", 0.5, WrapMode::Break),
            vec![("a", 0), ("b", 1), ("c", 2)]
        );
        assert_eq!(rows("ab", -1.0, WrapMode::Word), vec![("a", 0), ("b", 1)]);
    }

    #[test]
    fn word_wrap_respects_the_boundary_law() {
        let text = "The quick brown fox, jumping over   lazy dogs; then sleeping.\nNext\tline  here";
        for width in 1..=24 {
            let width = width as f32;
            let fragments = rows(text, width, WrapMode::Word);
            let mut cursor = 0;
            for (fragment, offset) in &fragments {
                assert!(
                    mono(fragment) <= width || fragment.chars().count() == 1,
                    "width {} fragment {:?} too wide",
                    width,
                    fragment
                );
                assert!(*offset >= cursor, "fragments must advance");
                assert!(
                    text[cursor..*offset].chars().all(char::is_whitespace),
                    "width {} skipped non-whitespace {:?}",
                    width,
                    &text[cursor..*offset]
                );
                assert_eq!(&text[*offset..*offset + fragment.len()], *fragment);
                cursor = offset + fragment.len();
            }
            assert!(text[cursor..].chars().all(char::is_whitespace));
        }
    }

    #[test]
    fn overlong_first_word_falls_back_to_hard_break() {
        assert_eq!(
            rows("  abcdefgh ij", 5.0, WrapMode::Word),
            vec![("  abc", 0), ("defgh", 5), ("ij", 11)]
        );
    }

    #[test]
    fn punctuation_detection_uses_unicode_categories() {
        for ch in ['.', ',', ';', '\u{bf}', '\u{2014}', '('] {
            assert!(is_punct(ch), "{:?} should be punctuation", ch);
        }
        for ch in ['a', '7', ' ', '+', '$'] {
            assert!(!is_punct(ch), "{:?} should not be punctuation", ch);
        }
    }

    #[test]
    fn wrap_document_anchors_each_fragment() {
        let lines = vec!["ab cd".to_string(), "ef".to_string()];
        let fragments = wrap_document(&lines, 2.0, WrapMode::Word, mono);
        let got: Vec<(&str, Anchor)> = fragments
            .iter()
            .map(|fragment| (fragment.text.as_str(), fragment.anchor))
            .collect();
        assert_eq!(
            got,
            vec![
                ("ab", Anchor::new(0, 0)),
                ("cd", Anchor::new(0, 3)),
                ("ef", Anchor::new(1, 0)),
            ]
        );
        assert_eq!(fragments[1].end(), Anchor::new(0, 5));
    }

    #[test]
    fn wrap_mode_parses_and_toggles() {
        assert_eq!(" Word ".parse::<WrapMode>(), Ok(WrapMode::Word));
        assert_eq!("BREAK".parse::<WrapMode>(), Ok(WrapMode::Break));
        assert_eq!("off".parse::<WrapMode>(), Ok(WrapMode::Off));
        assert_eq!(
            "diagonal".parse::<WrapMode>(),
            Err(PaneError::InvalidWrapMode("diagonal".to_string()))
        );
        assert_eq!(WrapMode::Word.toggled_word(), WrapMode::Off);
        assert_eq!(WrapMode::Break.toggled_word(), WrapMode::Word);
        assert_eq!(WrapMode::default().to_string(), "word");
    }
}
