use crate::cli::ColumnsArgs;
use crate::error::{CliError, Result};
use crate::settings_store::SettingsStore;
use crate::utils::parser;
use rnadesign::core::models::category::DesignCategory;
use rnadesign::engine::settings::BrowserSettings;

pub async fn run(args: ColumnsArgs, store: &SettingsStore) -> Result<()> {
    if args.available {
        for category in DesignCategory::ALL {
            println!("{}", category);
        }
        return Ok(());
    }

    if args.reset {
        let settings = BrowserSettings {
            marked: store.load()?.marked,
            ..Default::default()
        };
        store.save(&settings)?;
        println!("Columns reset to the defaults.");
    } else if let Some(list) = &args.set {
        let columns =
            parser::parse_column_list(list).map_err(|e| CliError::Argument(e.to_string()))?;
        let mut settings = store.load()?;
        settings.columns = dedup(columns);
        store.save(&settings)?;
    }

    let settings = store.load()?;
    println!("Columns stored in {}:", store.path().display());
    for (i, column) in settings.columns.iter().enumerate() {
        println!("  {}. {}", i + 1, column);
    }
    Ok(())
}

fn dedup(columns: Vec<DesignCategory>) -> Vec<DesignCategory> {
    let mut unique = Vec::with_capacity(columns.len());
    for column in columns {
        if !unique.contains(&column) {
            unique.push(column);
        }
    }
    unique
}
