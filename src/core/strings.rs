//! String transforms used to derive keys and display titles

/// Converts `input` to kebab case (`"Hello World"` -> `"hello-world"`).
///
/// Lowercases the input and turns every underscore, hyphen and space into a
/// hyphen. Applying it twice gives the same result as applying it once.
pub fn to_kebab_case(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other,
        })
        .collect()
}

/// Converts `input` to a user friendly title (`"call_to_action"` -> `"Call To Action"`).
///
/// Underscores become spaces and the first letter of every whitespace
/// separated word is uppercased. The rest of each word is left alone.
pub fn to_user_friendly_case(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;

    for c in input.chars() {
        let c = if c == '_' { ' ' } else { c };
        if at_word_start {
            output.extend(c.to_uppercase());
        } else {
            output.push(c);
        }
        at_word_start = c.is_whitespace();
    }

    output
}
