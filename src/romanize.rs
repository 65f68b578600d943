use std::collections::HashMap;

// map keys are single hanzi
fn lookup<'a>(map: &'a HashMap<String, String>, ch: char) -> Option<&'a str> {
    let mut buf = [0; 4];
    map.get(ch.encode_utf8(&mut buf)).map(String::as_str)
}

pub fn contains_mapped(name: &str, map: &HashMap<String, String>) -> bool {
    name.chars().any(|ch| lookup(map, ch).is_some())
}

pub fn romanize(name: &str, map: &HashMap<String, String>) -> String {
    if name.is_empty() {
        return String::new();
    }

    let mut segments: Vec<String> = Vec::new();
    let mut prev_mapped = false;
    let mut matched = false;

    for ch in name.chars() {
        match lookup(map, ch) {
            Some(pinyin) => {
                segments.push(pinyin.to_owned());
                prev_mapped = true;
                matched = true;
            },
            None => {
                // runs of unmapped characters coalesce into one segment
                if prev_mapped || segments.is_empty() {
                    segments.push(ch.to_string());
                } else {
                    segments.last_mut().unwrap().push(ch);
                }
                prev_mapped = false;
            }
        }
    }

    let mut joined = segments.join("_");
    if !matched {
        joined.insert(0, '_');
    }
    joined.replace("_.wav", ".wav")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries.iter().map(|&(h, p)| (h.to_owned(), p.to_owned())).collect()
    }

    #[test]
    fn no_underscore_before_the_extension() {
        assert_eq!(romanize("猫.wav", &map(&[("猫", "mao")])), "mao.wav");
    }

    #[test]
    fn unmapped_chars_between_hanzi_get_their_own_segment() {
        assert_eq!(romanize("A猫B", &map(&[("猫", "mao")])), "A_mao_B");
    }

    #[test]
    fn consecutive_unmapped_chars_coalesce() {
        let m = map(&[("猫", "mao"), ("叫", "jiao")]);
        assert_eq!(romanize("猫01叫.wav", &m), "mao_01_jiao.wav");
        assert_eq!(romanize("猫叫", &m), "mao_jiao");
    }

    #[test]
    fn never_matched_names_get_the_placeholder() {
        assert_eq!(romanize("hello", &HashMap::new()), "_hello");
    }

    #[test]
    fn leading_unmapped_run_takes_no_placeholder() {
        assert_eq!(romanize("abc猫", &map(&[("猫", "mao")])), "abc_mao");
    }

    #[test]
    fn empty_name_stays_empty() {
        assert_eq!(romanize("", &HashMap::new()), "");
    }

    #[test]
    fn contains_mapped_sees_single_hanzi() {
        let m = map(&[("猫", "mao")]);
        assert!(contains_mapped("大猫.wav", &m));
        assert!(!contains_mapped("mao.wav", &m));
    }
}
