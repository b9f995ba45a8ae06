use bookfetch::Candidate;
use eyre::{eyre, Context, Result};

use crate::app::candidate_line;

pub fn user_select<S: ToString>(prompt: &str, items: &[S]) -> Result<usize> {
    let selection = dialoguer::Select::with_theme(&dialoguer::theme::ColorfulTheme::default())
        .with_prompt(prompt)
        .default(0)
        .items(items)
        .interact_opt()
        .wrap_err_with(|| eyre!("User selection cancelled"))?;

    if let Some(index) = selection {
        Ok(index)
    } else {
        Err(eyre!("No selection made - cancelling operation"))
    }
}

/// Lets the user pick a candidate and returns its search index.
pub fn user_select_candidate(candidates: &[Candidate]) -> Result<usize> {
    let items: Vec<String> = candidates.iter().map(candidate_line).collect();
    user_select("Choose a book", &items).map(|i| candidates[i].index)
}
