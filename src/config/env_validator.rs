//! Validation of enumerated environment variables
//!
//! Invalid values fall back to the configured default with a warning that
//! lists the accepted values and, for near misses, suggests one.

use std::io::Write;

/// Validator for one enumerated environment variable
pub struct EnvVarValidator<'a> {
    var_name: &'a str,
    valid_values: &'a [&'a str],
}

impl<'a> EnvVarValidator<'a> {
    pub fn new(var_name: &'a str, valid_values: &'a [&'a str]) -> Self {
        Self {
            var_name,
            valid_values,
        }
    }

    /// Parse `value`, writing a warning to `writer` and returning `default`
    /// when `parser` rejects it.
    pub fn parse_with_writer<T, F, W>(
        &self,
        value: &str,
        parser: F,
        default: T,
        writer: &mut W,
    ) -> T
    where
        F: Fn(&str) -> Option<T>,
        W: Write,
    {
        if let Some(parsed) = parser(value) {
            return parsed;
        }

        let _ = writeln!(
            writer,
            "Warning: Invalid {} value '{}'{}",
            self.var_name,
            value,
            self.suggestion(value)
        );
        let _ = writeln!(writer, "Valid values: {}", self.valid_values.join(", "));
        default
    }

    fn suggestion(&self, value: &str) -> String {
        let input = value.trim().to_lowercase();
        let closest = self
            .valid_values
            .iter()
            .map(|valid| (*valid, levenshtein(&input, valid)))
            .min_by_key(|(_, dist)| *dist);

        match closest {
            Some((valid, dist)) if dist > 0 && dist <= 2 => format!(". Did you mean '{}'?", valid),
            _ => String::new(),
        }
    }
}

/// Edit distance between two ASCII-ish strings (byte-wise)
pub fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a = a.as_bytes();
    let b = b.as_bytes();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ac) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, bc) in b.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
