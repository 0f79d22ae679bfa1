use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};

use tabula_core::CategoryResolver;

/// Blocking console resolver: lists known categories and reads the
/// operator's choice from stdin. An in-range number picks an existing
/// category; any other non-empty line names a new one; end of input
/// signals interruption.
pub struct ConsolePrompt;

impl CategoryResolver for ConsolePrompt {
    fn resolve(
        &mut self,
        kind: &str,
        counter_party: &str,
        amount: Decimal,
        categories: &[String],
    ) -> io::Result<Option<String>> {
        println!("No category defined for: {kind} c/p {counter_party} (amount {amount})");
        loop {
            print!("Select: ");
            for (i, name) in categories.iter().enumerate() {
                print!("({i}) {name} ");
                if i > 0 && i % 10 == 0 {
                    println!();
                }
            }
            println!();
            println!("Or type a new category:");
            io::stdout().flush()?;

            let mut line = String::new();
            if io::stdin().lock().read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let choice = line.trim();
            if choice.is_empty() {
                continue;
            }
            if let Ok(ix) = choice.parse::<usize>() {
                if ix < categories.len() {
                    return Ok(Some(categories[ix].clone()));
                }
            }
            return Ok(Some(choice.to_string()));
        }
    }
}
