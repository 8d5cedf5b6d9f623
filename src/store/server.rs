//! `Store` is an actor. It owns the contact list and applies changes to it one message at a time.

use actix::{Actor, Context, Handler, Message, MessageResult};
use uuid::Uuid;

use super::{Contacts, Error};
use crate::contact::{Contact, ContactPatch, NewContact};

/// Everything in the store, oldest first
#[derive(Message)]
#[rtype(result = "Vec<Contact>")]
pub struct ListContacts;

impl Handler<ListContacts> for Store {
    type Result = MessageResult<ListContacts>;

    fn handle(&mut self, _: ListContacts, _: &mut Context<Self>) -> Self::Result {
        MessageResult(self.contacts.list().to_vec())
    }
}

/// Add a validated contact
#[derive(Message)]
#[rtype(result = "Contact")]
pub struct CreateContact(pub NewContact);

impl Handler<CreateContact> for Store {
    type Result = MessageResult<CreateContact>;

    fn handle(&mut self, msg: CreateContact, _: &mut Context<Self>) -> Self::Result {
        let CreateContact(fields) = msg;
        MessageResult(self.contacts.create(fields))
    }
}

/// Merge a validated patch over an existing contact
#[derive(Message)]
#[rtype(result = "Result<Contact, Error>")]
pub struct UpdateContact {
    pub id: Uuid,
    pub patch: ContactPatch,
}

impl Handler<UpdateContact> for Store {
    type Result = Result<Contact, Error>;

    fn handle(&mut self, msg: UpdateContact, _: &mut Context<Self>) -> Self::Result {
        self.contacts.update(msg.id, msg.patch)
    }
}

/// Remove a contact for good
#[derive(Message)]
#[rtype(result = "Result<Contact, Error>")]
pub struct DeleteContact(pub Uuid);

impl Handler<DeleteContact> for Store {
    type Result = Result<Contact, Error>;

    fn handle(&mut self, DeleteContact(id): DeleteContact, _: &mut Context<Self>) -> Self::Result {
        self.contacts.delete(id)
    }
}

/// `Store` is responsible for the only copy of the contact list.
/// Spin up a new one for each test to keep them from seeing each other's contacts.
#[derive(Default)]
pub struct Store {
    contacts: Contacts,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actor for Store {
    /// Simple Context: all we do is answer messages.
    type Context = Context<Self>;
}
