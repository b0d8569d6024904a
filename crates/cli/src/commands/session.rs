//! Session commands: login and logout.

use super::{CliError, Context};

/// Open a session if the credentials match the configured pair.
pub async fn login(username: &str, password: &str) -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    if ctx.gate.login(username, password).await? {
        println!("logged in");
        Ok(())
    } else {
        Err(CliError::LoginRejected)
    }
}

/// End the session. The product mirror is left untouched.
pub async fn logout() -> Result<(), CliError> {
    let ctx = Context::from_env()?;
    ctx.gate.logout().await?;
    println!("logged out");
    Ok(())
}
