use crate::storage;
use soroban_sdk::{Address, Env, Vec};

pub fn add(env: &Env, who: &Address) {
    storage::set_whitelisted(env, who, true);
}

pub fn remove(env: &Env, who: &Address) {
    storage::set_whitelisted(env, who, false);
}

pub fn add_many(env: &Env, addrs: &Vec<Address>) {
    for who in addrs.iter() {
        add(env, &who);
    }
}

pub fn remove_many(env: &Env, addrs: &Vec<Address>) {
    for who in addrs.iter() {
        remove(env, &who);
    }
}
