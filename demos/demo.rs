use dragon_cfg::{ConfigLoader, Schema};

fn main() -> Result<(), dragon_cfg::Error> {
    let schema = Schema::from_toml_str(
        r#"
        name = { required = true }
        port = { default = 8080 }
        debug = { default = false }
        "#,
    )?;

    let store = ConfigLoader::new()
        .with_fallback_files(["demos/local.toml", "demos/default.toml"])
        .with_env("DEMO", "__")
        .with_schema(schema)
        .build()?;

    let name: String = store.get(&["name"])?;
    let port: u16 = store.get(&["port"])?;
    println!("{name} listening on port {port}");

    if store.has_joined_key("database, url") {
        println!("Database URL: {}", store.get_joined_key("database, url")?);
    }

    for key in store.get_keys() {
        println!("top-level key: {key}");
    }

    Ok(())
}
