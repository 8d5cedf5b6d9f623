//! The one authoritative list of contacts.
//!
//! [`Contacts`] is the plain collection and its rules; [`Store`] is the actor that owns one
//! and hands out access to it a message at a time, so no two writes ever interleave.
use crate::contact::{Contact, ContactPatch, NewContact};
use chrono::Utc;
use log::*;
use std::fmt;
use uuid::Uuid;

mod server;
pub use server::{CreateContact, DeleteContact, ListContacts, Store, UpdateContact};


#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// No contact with this id is in the store.
    NotFound(Uuid),
}
use Error::*;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotFound(id) => write!(f, "Contact with id {} not found", id),
        }
    }
}

impl std::error::Error for Error {}

/// Contacts in the order they were created.
#[derive(Debug, Default)]
pub struct Contacts {
    contacts: Vec<Contact>,
}

impl Contacts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    fn position(&self, id: Uuid) -> Result<usize, Error> {
        self.contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(NotFound(id))
    }

    /// Gives the contact a fresh id and timestamps and appends it.
    pub fn create(&mut self, fields: NewContact) -> Contact {
        let contact = Contact::new(Uuid::new_v4(), fields, Utc::now());
        info!("contact created: {:?}", contact);

        self.contacts.push(contact.clone());
        contact
    }

    /// Merges `patch` over the contact with this id. Never creates a contact.
    pub fn update(&mut self, id: Uuid, patch: ContactPatch) -> Result<Contact, Error> {
        let i = self.position(id)?;

        // merge into a copy so the stored contact is replaced whole
        let mut contact = self.contacts[i].clone();
        contact.apply(patch, Utc::now());
        info!("contact updated: {:?}", contact);

        self.contacts[i] = contact.clone();
        Ok(contact)
    }

    /// Removes the contact with this id, handing it back.
    pub fn delete(&mut self, id: Uuid) -> Result<Contact, Error> {
        let i = self.position(id)?;

        let contact = self.contacts.remove(i);
        info!("contact deleted: {:?}", contact);

        Ok(contact)
    }
}
