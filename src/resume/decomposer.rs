// src/resume/decomposer.rs
//! Splitting of a raw row value into atomic skills.

use super::categories::SplitStrategy;

/// Break `value` into skills according to `strategy`. Empty pieces are
/// never returned.
pub fn decompose(value: &str, strategy: SplitStrategy, line_break: &str) -> Vec<String> {
    let value = value.trim();
    if value.is_empty() {
        return Vec::new();
    }

    match strategy {
        SplitStrategy::CommaList => split_list(value, ','),
        SplitStrategy::Hobbies => split_hobbies(value, line_break),
        SplitStrategy::WholeValue => vec![value.to_string()],
        SplitStrategy::Languages => split_languages(value),
        SplitStrategy::Specialization => split_specialization(value, line_break),
    }
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn split_hobbies(value: &str, line_break: &str) -> Vec<String> {
    let normalized = if line_break.is_empty() {
        value.to_string()
    } else {
        value.replace(line_break, ";")
    };

    let mut skills = Vec::new();
    for hobby in normalized.split(';').map(str::trim) {
        match hobby.split_once(':') {
            Some((label, list)) => {
                let label = label.trim();
                if !label.is_empty() {
                    skills.push(label.to_string());
                }
                skills.extend(split_list(list, ','));
            }
            None if !hobby.is_empty() => skills.push(hobby.to_string()),
            None => {}
        }
    }
    skills
}

fn split_languages(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once('-') {
            Some((name, level)) => format!("{} ({})", name.trim(), level.trim()),
            None => entry.to_string(),
        })
        .collect()
}

fn split_specialization(value: &str, line_break: &str) -> Vec<String> {
    let sections: Vec<&str> = if line_break.is_empty() {
        vec![value]
    } else {
        value.split(line_break).collect()
    };

    sections
        .into_iter()
        .map(|section| strip_enumeration(section.trim()))
        .filter(|section| !section.is_empty())
        .flat_map(split_composite)
        .collect()
}

/// `"3. Git"` -> `"Git"`. Anything not led by `<digits>.` is returned as is.
fn strip_enumeration(section: &str) -> &str {
    match section.split_once('.') {
        Some((number, rest))
            if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) =>
        {
            rest.trim()
        }
        _ => section,
    }
}

/// `"label: a, b"` keeps only `a` and `b`; a section without a colon is one
/// skill.
fn split_composite(section: &str) -> Vec<String> {
    match section.split_once(':') {
        Some((_label, values)) => split_list(values, ','),
        None => vec![section.to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BR: &str = "<br>";

    #[test]
    fn test_comma_list() {
        assert_eq!(
            decompose("A, B, C", SplitStrategy::CommaList, BR),
            vec!["A", "B", "C"]
        );
        assert_eq!(
            decompose(" A ,, B , ", SplitStrategy::CommaList, BR),
            vec!["A", "B"]
        );
    }

    #[test]
    fn test_hobbies_with_labelled_list() {
        assert_eq!(
            decompose("Чтение;Игры: Шахматы, Го", SplitStrategy::Hobbies, BR),
            vec!["Чтение", "Игры", "Шахматы", "Го"]
        );
    }

    #[test]
    fn test_hobbies_line_breaks_act_as_separators() {
        assert_eq!(
            decompose("Бег<br>Книги: Толстой", SplitStrategy::Hobbies, BR),
            vec!["Бег", "Книги", "Толстой"]
        );
    }

    #[test]
    fn test_whole_value() {
        assert_eq!(
            decompose("Победитель олимпиады, 2019", SplitStrategy::WholeValue, BR),
            vec!["Победитель олимпиады, 2019"]
        );
    }

    #[test]
    fn test_languages() {
        assert_eq!(
            decompose("English - B2; German - A1", SplitStrategy::Languages, BR),
            vec!["English (B2)", "German (A1)"]
        );
        assert_eq!(
            decompose("Русский; English - Upper-Intermediate", SplitStrategy::Languages, BR),
            vec!["Русский", "English (Upper-Intermediate)"]
        );
    }

    #[test]
    fn test_specialization_sections() {
        let value = "1. Языки: Rust, Python<br> 2. Базы данных: PostgreSQL<br> 3. Git";
        assert_eq!(
            decompose(value, SplitStrategy::Specialization, BR),
            vec!["Rust", "Python", "PostgreSQL", "Git"]
        );
    }

    #[test]
    fn test_enumeration_requires_leading_digits() {
        assert_eq!(strip_enumeration("12. Linux"), "Linux");
        assert_eq!(strip_enumeration("3D modeling. Blender"), "3D modeling. Blender");
        assert_eq!(strip_enumeration("Node.js"), "Node.js");
    }

    #[test]
    fn test_empty_value_yields_nothing() {
        for strategy in [
            SplitStrategy::CommaList,
            SplitStrategy::Hobbies,
            SplitStrategy::WholeValue,
            SplitStrategy::Languages,
            SplitStrategy::Specialization,
        ] {
            assert!(decompose("  ", strategy, BR).is_empty());
        }
    }
}
