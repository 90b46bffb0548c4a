use lords::LordsApp;
use lords::auth::{LoginCredentials, RegisterCredentials};

use crate::error::CliError;

pub async fn login(app: &LordsApp, email: String, password: String) -> Result<(), CliError> {
    let user = app.auth().login(&LoginCredentials { email, password }).await?;
    println!("✅ Logged in as {} ({})", user.username, user.role);
    Ok(())
}

pub async fn register(
    app: &LordsApp,
    username: String,
    email: String,
    password: String,
    bio: Option<String>,
) -> Result<(), CliError> {
    let user = app
        .auth()
        .register(&RegisterCredentials {
            username,
            email,
            password,
            bio,
        })
        .await?;

    if app.session().is_authenticated() {
        println!("✅ Registered and logged in as {}", user.username);
    } else {
        println!("✅ Registered {}. Log in with: lords login", user.username);
    }
    Ok(())
}

pub async fn logout(app: &LordsApp) -> Result<(), CliError> {
    app.auth().logout().await?;
    println!("👋 Logged out");
    Ok(())
}

/// Show the stored user; with `verify`, confirm the token with the server first
pub async fn whoami(app: &LordsApp, verify: bool) -> Result<(), CliError> {
    if verify && !app.auth().verify().await? {
        println!("❌ Not logged in (session expired or missing)");
        return Ok(());
    }

    match app.session().user() {
        Some(user) => {
            println!("👤 {} <{}>", user.username, user.email);
            println!("   Role: {}", user.role);
            if let Some(bio) = &user.bio {
                println!("   Bio:  {}", bio);
            }
        }
        None if app.session().is_authenticated() => {
            let user = app.auth().profile().await?;
            println!("👤 {} <{}>", user.username, user.email);
            println!("   Role: {}", user.role);
        }
        None => println!("❌ Not logged in"),
    }
    Ok(())
}
