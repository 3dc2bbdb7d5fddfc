//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after a migration changes a table.

diesel::table! {
    /// ISO-3166 reference countries.
    countries (code) {
        /// Two-letter uppercase country code.
        code -> Varchar,
        name -> Text,
    }
}

diesel::table! {
    /// Registered authors keyed by their identity provider subject.
    users (id) {
        id -> Int8,
        /// Identity provider uid; unique (`users_subject_key`).
        subject -> Text,
        title -> Text,
        /// Lowercased email; unique (`users_email_key`).
        email -> Text,
        country_code -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Seeded anger tier ladder; `rank` is unique and orders the tiers.
    anger_tiers (id) {
        id -> Int8,
        label -> Text,
        rank -> Int4,
    }
}

diesel::table! {
    /// Feed entries. `created_at` is the pagination key.
    entries (id) {
        id -> Int8,
        user_id -> Int8,
        country_code -> Varchar,
        anger_tier_id -> Int8,
        text -> Text,
        /// Raw submitted score, not the tier rank.
        rage_level -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(users -> countries (country_code));
diesel::joinable!(entries -> users (user_id));
diesel::joinable!(entries -> anger_tiers (anger_tier_id));

diesel::allow_tables_to_appear_in_same_query!(countries, users, anger_tiers, entries);
