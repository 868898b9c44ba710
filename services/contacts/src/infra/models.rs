use rolodex_contacts_schema::{important_dates, otps, persons, phones, relationships, tags, users};

use crate::domain::types::{ImportantDate, OtpTicket, Person, Phone, Relationship, Tag, User};

pub fn user_from_model(m: users::Model) -> User {
    User {
        id: m.id,
        email: m.email,
        name: m.name,
        avatar: m.avatar,
        verified_at: m.verified_at,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

pub fn otp_ticket_from_model(m: otps::Model) -> OtpTicket {
    OtpTicket {
        id: m.id,
        user_id: m.user_id,
        token: m.token,
        expires_at: m.expires_at,
        created_at: m.created_at,
    }
}

pub fn person_from_model(m: persons::Model) -> Person {
    Person {
        id: m.id,
        user_id: m.user_id,
        first_name: m.first_name,
        last_name: m.last_name,
        nickname: m.nickname,
        avatar: m.avatar,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
        tags: None,
        relationships: None,
        phones: None,
        important_dates: None,
    }
}

pub fn tag_from_model(m: tags::Model) -> Tag {
    Tag {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        created_at: m.created_at,
        updated_at: m.updated_at,
        persons: None,
    }
}

pub fn relationship_from_model(m: relationships::Model) -> Relationship {
    Relationship {
        id: m.id,
        user_id: m.user_id,
        name: m.name,
        color: m.color,
        created_at: m.created_at,
        updated_at: m.updated_at,
        persons: None,
    }
}

pub fn phone_from_model(m: phones::Model) -> Phone {
    Phone {
        id: m.id,
        user_id: m.user_id,
        person_id: m.person_id,
        name: m.name,
        number: m.number,
        created_at: m.created_at,
        updated_at: m.updated_at,
        person: None,
    }
}

pub fn important_date_from_model(m: important_dates::Model) -> ImportantDate {
    ImportantDate {
        id: m.id,
        user_id: m.user_id,
        person_id: m.person_id,
        name: m.name,
        date: m.date,
        created_at: m.created_at,
        updated_at: m.updated_at,
        person: None,
    }
}
