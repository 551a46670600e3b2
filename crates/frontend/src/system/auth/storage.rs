use web_sys::window;

/// Session token written by the sign-in page of the console
const TOKEN_KEY: &str = "token";
/// Optional TOML configuration override
const CONFIG_KEY: &str = "console_config";

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// Get session token from localStorage
pub fn get_token() -> Option<String> {
    get_local_storage()?.get_item(TOKEN_KEY).ok()?
}

/// Get the configuration override from localStorage
pub fn get_config_override() -> Option<String> {
    get_local_storage()?.get_item(CONFIG_KEY).ok()?
}
