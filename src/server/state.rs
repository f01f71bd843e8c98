use crate::auth::TokenStore;
use crate::registry::ParcelRegistry;
use crate::route::RouteResolver;
use std::sync::Mutex;

pub struct AppState {
    pub registry: Mutex<ParcelRegistry>,
    pub resolver: RouteResolver,
    pub tokens: TokenStore,
}
