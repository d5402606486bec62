use dialoguer::theme::ColorfulTheme;
use dialoguer::FuzzySelect;
use std::io::IsTerminal;

/// Picks one option out of a ranked list. `None` means the user cancelled.
pub trait Chooser {
    fn choose(&mut self, prompt: &str, options: &[String]) -> anyhow::Result<Option<String>>;
}

/// Interactive fuzzy filter on the terminal.
pub struct FuzzyChooser;

impl Chooser for FuzzyChooser {
    fn choose(&mut self, prompt: &str, options: &[String]) -> anyhow::Result<Option<String>> {
        if options.is_empty() {
            anyhow::bail!("nothing to choose for '{prompt}'");
        }
        if !std::io::stdin().is_terminal() {
            anyhow::bail!("cannot ask '{prompt}': stdin is not a terminal");
        }
        let picked = FuzzySelect::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(options)
            .default(0)
            .interact_opt()?;
        Ok(picked.map(|i| options[i].clone()))
    }
}
