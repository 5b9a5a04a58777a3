use crate::errors::Error;
use crate::storage;
use crate::types::SaleConfig;
use soroban_sdk::{Address, Env};

/// Owner or any member of the admin set.
pub fn has_admin_rights(env: &Env, config: &SaleConfig, who: &Address) -> bool {
    &config.owner == who || storage::is_admin(env, who)
}

/// Authenticates `caller` and checks admin rights, returning the loaded config.
pub fn require_admin(env: &Env, caller: &Address) -> Result<SaleConfig, Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if !has_admin_rights(env, &config, caller) {
        return Err(Error::NotAdmin);
    }
    Ok(config)
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<SaleConfig, Error> {
    caller.require_auth();
    let config = storage::get_config(env)?;
    if &config.owner != caller {
        return Err(Error::NotOwner);
    }
    Ok(config)
}
