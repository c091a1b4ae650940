//! Session context
//!
//! The bearer token lives in a `TokenStore` (browser `localStorage` on the
//! client, memory on the server). A `Session` is created with `init`, which
//! loads whatever the store holds, and ended with `teardown`, which clears it.

/// Persistent home of the auth token
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&mut self, token: &str);
    fn clear(&mut self);
}

/// In-memory store, used server-side and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    token: Option<String>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.clone()
    }

    fn save(&mut self, token: &str) {
        self.token = Some(token.to_string());
    }

    fn clear(&mut self) {
        self.token = None;
    }
}

fn usable_token(raw: &str) -> Option<String> {
    let token = raw.trim();
    (!token.is_empty()).then(|| token.to_string())
}

#[derive(Debug, Clone)]
pub struct Session<S: TokenStore> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// Load the token from the store; blank tokens count as absent
    pub fn init(store: S) -> Self {
        let token = store.load().as_deref().and_then(usable_token);
        Self { store, token }
    }

    /// Store a new token; a blank one ends the session instead
    pub fn login(&mut self, token: &str) {
        match usable_token(token) {
            Some(token) => {
                self.store.save(&token);
                self.token = Some(token);
            }
            None => self.teardown(),
        }
    }

    /// Forget the token and wipe the store
    pub fn teardown(&mut self) {
        self.store.clear();
        self.token = None;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Value for the `Authorization` header, if a token is held
    pub fn authorization_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl Session<MemoryTokenStore> {
    pub fn anonymous() -> Self {
        Self::init(MemoryTokenStore::default())
    }
}
