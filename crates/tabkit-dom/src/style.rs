//! Inline `style` attribute declarations

/// Split an inline style into `(property, value)` pairs.
///
/// Property names are lowercased. Semicolons inside parentheses or quotes
/// (e.g. `url(a;b)`) do not terminate a declaration. Declarations without a
/// colon or with an empty name are dropped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    let mut declarations = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in style.char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                push_declaration(&mut declarations, &style[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_declaration(&mut declarations, &style[start..]);

    declarations
}

fn push_declaration(out: &mut Vec<(String, String)>, raw: &str) {
    let Some((name, value)) = raw.split_once(':') else {
        return;
    };
    let name = name.trim();
    if name.is_empty() {
        return;
    }
    out.push((name.to_ascii_lowercase(), value.trim().to_string()));
}

pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{}: {}", name, value))
        .collect::<Vec<_>>()
        .join("; ")
}
