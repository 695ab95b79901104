//! The `inulearn token` commands.

use anyhow::Result;

use inulearn_providers::create_token_service;

use super::{print_json, Settings};

pub fn issue(settings: &Settings, subject: &str, role: &str) -> Result<()> {
    let config = settings.load()?;
    let tokens = create_token_service(&config.auth)?;
    print_json(&tokens.issue(subject, role)?)
}

pub fn verify(settings: &Settings, token: &str) -> Result<()> {
    let config = settings.load()?;
    let tokens = create_token_service(&config.auth)?;
    print_json(&tokens.verify(token)?)
}

pub fn refresh(settings: &Settings, token: &str) -> Result<()> {
    let config = settings.load()?;
    let tokens = create_token_service(&config.auth)?;
    print_json(&tokens.refresh(token)?)
}
