use anyhow::Result;

use crate::config::Config;

pub async fn handle_get_command(key: String) -> Result<()> {
    let config = Config::load()?;

    match config.get(&key) {
        Some(value) => println!("{value}"),
        None => println!("{key} is not set"),
    }

    Ok(())
}

pub async fn handle_set_command(key: String, value: String) -> Result<()> {
    let mut config = Config::load()?;

    config.set(&key, value.clone())?;
    config.save()?;

    println!("✓ Set {key} = {value}");

    Ok(())
}

pub async fn handle_unset_command(key: String) -> Result<()> {
    let mut config = Config::load()?;

    config.unset(&key)?;
    config.save()?;

    println!("✓ Reset {key} to its default");

    Ok(())
}

pub async fn handle_list_command() -> Result<()> {
    let config = Config::load()?;

    for (key, value) in config.list() {
        println!("{key} = {value}");
    }

    Ok(())
}

pub async fn handle_path_command() -> Result<()> {
    let path = Config::get_config_path()?;
    println!("{}", path.display());

    Ok(())
}
