#![allow(dead_code)]

use lords::Transport;
use lords::session::{InMemorySessionStore, Session, SessionHandle};
use lords::{Role, User};
use mockito::ServerGuard;
use std::sync::Arc;

pub fn user(role: Role) -> User {
    User {
        id: 1,
        username: "daenerys".to_string(),
        email: "dany@dragonstone.es".to_string(),
        role,
        bio: None,
    }
}

pub async fn anonymous() -> (SessionHandle, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let handle = SessionHandle::init(store.clone()).await.unwrap();
    (handle, store)
}

pub async fn signed_in(token: &str) -> (SessionHandle, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::with_session(Session {
        token: token.to_string(),
        user: Some(user(Role::User)),
    }));
    let handle = SessionHandle::init(store.clone()).await.unwrap();
    (handle, store)
}

pub fn transport(server: &ServerGuard, session: SessionHandle) -> Transport {
    Transport::with_client(reqwest::Client::new(), server.url(), session)
}
