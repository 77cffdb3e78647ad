use anyhow::{bail, Result};

use complyviz_core::api::CredentialStore;
use complyviz_core::AppConfig;

use super::api_client;

pub async fn login(config: &AppConfig, email: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => rpassword::prompt_password(format!("Password for {}: ", email))?,
    };
    if password.is_empty() {
        bail!("Password must not be empty");
    }

    let client = api_client(config)?;
    let user = client.login(email, &password).await?;

    println!("Signed in as {}", user.name.as_deref().unwrap_or(&user.email));
    println!("  API: {}", client.base_url());
    Ok(())
}

pub async fn logout(config: &AppConfig) -> Result<()> {
    let client = api_client(config)?;
    if client.credentials().get_token()?.is_none() {
        println!("Not signed in.");
        return Ok(());
    }
    client.logout().await?;
    println!("Signed out.");
    Ok(())
}

pub async fn whoami(config: &AppConfig) -> Result<()> {
    let client = api_client(config)?;
    if client.credentials().get_token()?.is_none() {
        println!("Not signed in.");
        println!("\nTo sign in, run:");
        println!("  complyviz login --email <email>");
        return Ok(());
    }

    let user = client.me().await?;
    match &user.name {
        Some(name) => println!("{} <{}>", name, user.email),
        None => println!("{}", user.email),
    }
    println!("  id: {}", user.id);
    if let Some(org) = &user.organization_id {
        println!("  organization: {}", org);
    }
    Ok(())
}
