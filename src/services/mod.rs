// Service exports
pub mod documents;
pub mod firestore;
pub mod sessions;

pub use firestore::{FirestoreClient, FirestoreCollections, FirestoreError};
pub use sessions::SessionStore;
