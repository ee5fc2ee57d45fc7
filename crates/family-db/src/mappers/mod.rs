//! Entity to model mappers
//!
//! `TryFrom<UserModel> for User` converts rows into domain objects.

mod user;
