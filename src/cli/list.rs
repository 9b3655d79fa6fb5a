use super::ui;
use crate::core::Explorer;
use anyhow::Result;

pub fn categories(explorer: &Explorer) -> Result<()> {
    let categories = explorer.categories()?;
    print_options("Categories", &categories);
    Ok(())
}

pub fn amcs(explorer: &Explorer, category: &str) -> Result<()> {
    let amcs = explorer.amcs(category)?;
    print_options(&format!("AMCs in {category}"), &amcs);
    Ok(())
}

fn print_options(title: &str, options: &[String]) {
    println!("{}", ui::style_text(title, ui::StyleType::Title));
    if options.is_empty() {
        println!("{}", ui::style_text("(none)", ui::StyleType::Subtle));
    }
    for option in options {
        println!("  {option}");
    }
}
