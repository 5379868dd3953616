#[cfg(test)]
mod tests {
    use crate::utils::{excerpt, sanitize_path_component, tail, word_count};

    #[test]
    fn test_word_count() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
        assert_eq!(word_count("# Title\n\n- item"), 4);
    }

    #[test]
    fn test_excerpt() {
        assert_eq!(excerpt("short", 10), "short");
        assert_eq!(excerpt("abcdef", 3), "abc...");
        // 多字节字符不会被截断在字符中间
        assert_eq!(excerpt("ŁódźŁódź", 4), "Łódź...");
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("abc", 10), "abc");
        assert_eq!(tail("abcdef", 2), "ef");
        assert_eq!(tail("日本語テキスト", 3), "キスト");
    }

    #[test]
    fn test_sanitize_path_component() {
        assert_eq!(
            sanitize_path_component("Youth: Mentorship/2025?"),
            "Youth_ Mentorship_2025_"
        );
        assert_eq!(sanitize_path_component("a<b>c\"d|e*f\\g"), "a_b_c_d_e_f_g");
        assert_eq!(sanitize_path_component("   "), "untitled");
        assert_eq!(sanitize_path_component(".."), "untitled");
        assert_eq!(sanitize_path_component(" . "), "untitled");
        assert_eq!(sanitize_path_component("v1.2"), "v1.2");
    }
}
