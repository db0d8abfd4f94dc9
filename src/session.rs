//! Sessions and the credential store
//!
//! The bearer token and the signed-in account live in one place, behind the
//! [`CredentialStore`] abstraction: a backing file for real apps, plain memory for
//! tests. A [`Session`] ties a store to a [`Client`](crate::client::Client) and keeps
//! both in sync through login and logout.

use std::error::Error;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::client::Client;
use crate::workspace::Account;

/// What the server grants on a successful login
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    account: Option<Account>,
}

impl Credentials {
    pub fn new(token: String, account: Option<Account>) -> Self {
        Self { token, account }
    }

    pub fn token(&self) -> &str { &self.token }
    pub fn account(&self) -> Option<&Account> { self.account.as_ref() }

    pub fn into_account(self) -> Option<Account> {
        self.account
    }

    pub fn is_admin(&self) -> bool {
        self.account.as_ref().map(|account| account.is_admin()).unwrap_or(false)
    }
}

/// Where credentials are kept between runs
pub trait CredentialStore {
    /// The stored credentials, if any
    fn get(&self) -> Option<Credentials>;
    /// Replace the stored credentials
    fn set(&mut self, credentials: Credentials);
    /// Forget the stored credentials
    fn clear(&mut self);
}

/// A credential store backed by a JSON file
#[derive(Debug, PartialEq)]
pub struct FileStore {
    backing_file: PathBuf,
    data: Option<Credentials>,
}

impl FileStore {
    /// Initialize a store from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self {
            backing_file: PathBuf::from(path),
            data,
        })
    }

    /// Initialize an empty store over a backing file that may not exist yet
    pub fn new(path: &Path) -> Self {
        Self {
            backing_file: PathBuf::from(path),
            data: None,
        }
    }

    /// Store the current credentials to the backing file
    fn save_to_file(&self) {
        let path = &self.backing_file;
        let file = match std::fs::File::create(path) {
            Err(err) => {
                log::warn!("Unable to save file {:?}: {}", path, err);
                return;
            },
            Ok(f) => f,
        };

        if let Err(err) = serde_json::to_writer(file, &self.data) {
            log::warn!("Unable to serialize: {}", err);
            return;
        };
    }
}

impl CredentialStore for FileStore {
    fn get(&self) -> Option<Credentials> {
        self.data.clone()
    }

    fn set(&mut self, credentials: Credentials) {
        self.data = Some(credentials);
        self.save_to_file();
    }

    fn clear(&mut self) {
        self.data = None;
        self.save_to_file();
    }
}

/// A credential store that forgets everything when dropped
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Option<Credentials>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self) -> Option<Credentials> {
        self.data.clone()
    }

    fn set(&mut self, credentials: Credentials) {
        self.data = Some(credentials);
    }

    fn clear(&mut self) {
        self.data = None;
    }
}

/// A signed-in (or signed-out) connection to the board service
pub struct Session<S: CredentialStore> {
    api_base: Url,
    store: S,
    client: Option<Client>,
}

impl<S: CredentialStore> Session<S> {
    /// Open a session over an existing store. If the store already holds a token,
    /// the client is usable immediately, without a new login.
    pub fn open<A: AsRef<str>>(api_base: A, store: S) -> Result<Self, Box<dyn Error>> {
        let api_base = Url::parse(api_base.as_ref())?;
        let client = match store.get() {
            Some(credentials) => Some(Client::new(api_base.as_str(), credentials.token())?),
            None => None,
        };
        Ok(Self { api_base, store, client })
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.is_some()
    }

    /// The authenticated client, or `None` before login / after logout
    pub fn client(&self) -> Option<&Client> {
        self.client.as_ref()
    }

    /// The signed-in account, as stored at login time
    pub fn account(&self) -> Option<Account> {
        self.store.get().and_then(|credentials| credentials.into_account())
    }

    /// Authenticate against the server and persist the granted credentials
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), Box<dyn Error>> {
        let (client, credentials) = Client::log_in(self.api_base.as_str(), email, password).await?;
        self.store.set(credentials);
        self.client = Some(client);
        Ok(())
    }

    /// Sign out. Server-side revocation is best-effort; the local credentials are
    /// always cleared, even when the server cannot be reached.
    pub async fn logout(&mut self) {
        if let Some(client) = &self.client {
            if let Err(err) = client.log_out().await {
                log::warn!("Unable to invalidate the server-side session: {}", err);
            }
        }
        self.store.clear();
        self.client = None;
    }
}
