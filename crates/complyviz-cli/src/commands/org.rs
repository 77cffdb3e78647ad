use anyhow::Result;

use complyviz_core::api::{normalize_org_number, Organization};
use complyviz_core::AppConfig;

use super::api_client;

pub async fn search(config: &AppConfig, query: &str) -> Result<()> {
    let client = api_client(config)?;
    let organizations = client.search_organizations(query).await?;

    if organizations.is_empty() {
        println!("No organizations match \"{}\".", query.trim());
        return Ok(());
    }

    println!("Organizations ({}):\n", organizations.len());
    for organization in &organizations {
        println!("  {}  {}", organization.org_number, organization.name);
    }
    Ok(())
}

pub async fn get(config: &AppConfig, org_number: &str) -> Result<()> {
    let number = normalize_org_number(org_number)?;
    let client = api_client(config)?;

    match client.organization(&number).await? {
        Some(organization) => print_organization(&organization),
        None => println!("No organization with number {}.", number),
    }
    Ok(())
}

fn print_organization(organization: &Organization) {
    println!("{} ({})", organization.name, organization.org_number);
    if let Some(form) = &organization.organization_form {
        println!("  Form: {}", form);
    }
    if let Some(industry) = &organization.industry {
        println!("  Industry: {}", industry);
    }
    if let Some(employees) = organization.employees {
        println!("  Employees: {}", employees);
    }
    if let Some(address) = &organization.address {
        println!("  Address: {}", address);
    }
}
