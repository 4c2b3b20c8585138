//! In-memory resource store for books and users.
//!
//! A [`Store`] is built once per process and shared with the HTTP modules as
//! a [`SharedStore`]. Every mutation runs to completion under the write lock.

mod collection;
mod error;

use std::sync::Arc;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use crate::modules::books::models::{Book, BookFields, DEFAULT_GENRE};
use crate::modules::users::models::{User, UserFields, DEFAULT_ROLE};

pub use collection::{Collection, FieldValue, ListQuery, Record};
pub use error::StoreError;

/// Handle passed to every module that reads or writes the store.
pub type SharedStore = Arc<RwLock<Store>>;

/// Criteria for [`Store::search_books`]; every supplied criterion must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Case-insensitive substring of title, author or genre
    pub text: Option<String>,
    /// Inclusive lower bound on `year`
    pub min_year: Option<i32>,
    /// Inclusive upper bound on `year`
    pub max_year: Option<i32>,
    /// Case-insensitive substring of author
    pub author: Option<String>,
}

impl SearchQuery {
    fn matches(&self, book: &Book) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        let text = self.text.as_deref().map_or(true, |text| {
            contains(&book.title, text) || contains(&book.author, text) || contains(&book.genre, text)
        });
        let author = self
            .author
            .as_deref()
            .map_or(true, |author| contains(&book.author, author));
        let after_min = self.min_year.map_or(true, |min| book.year >= min);
        let before_max = self.max_year.map_or(true, |max| book.year <= max);

        text && author && after_min && before_max
    }
}

/// Result of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    pub before: Book,
    pub after: Book,
    pub changed_fields: Vec<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    books: Collection<Book>,
    users: Collection<User>,
}

impl Store {
    /// Empty store; ids start at 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding the sample rows every process starts with.
    pub fn seeded() -> Self {
        Self {
            books: Collection::seeded(seed_books()),
            users: Collection::seeded(seed_users()),
        }
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }

    pub fn books(&self) -> &Collection<Book> {
        &self.books
    }

    pub fn users(&self) -> &Collection<User> {
        &self.users
    }

    pub fn list_books(&self, query: &ListQuery) -> Vec<Book> {
        self.books.list(query)
    }

    pub fn get_book(&self, id: u64) -> Result<Book, StoreError> {
        self.books
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Book::KIND, id))
    }

    pub fn search_books(&self, query: &SearchQuery) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect()
    }

    /// Requires non-empty `title` and `author`; `year` defaults to the
    /// current year and `genre` to [`DEFAULT_GENRE`].
    pub fn create_book(&mut self, fields: BookFields) -> Result<Book, StoreError> {
        let missing = fields.missing_required(false);
        if !missing.is_empty() {
            return Err(StoreError::missing_fields(Book::KIND, missing));
        }

        let book = self.books.insert_with(|id| Book {
            id,
            title: fields.title.unwrap_or_default(),
            author: fields.author.unwrap_or_default(),
            year: fields.year.unwrap_or_else(current_year),
            genre: fields.genre.unwrap_or_else(|| DEFAULT_GENRE.to_string()),
        });

        tracing::info!(book_id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Overwrite every field of an existing book, keeping its id.
    pub fn replace_book(&mut self, id: u64, fields: BookFields) -> Result<Book, StoreError> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(Book::KIND, id))?;

        let missing = fields.missing_required(true);
        if !missing.is_empty() {
            return Err(StoreError::missing_fields(Book::KIND, missing));
        }

        *book = Book {
            id,
            title: fields.title.unwrap_or_default(),
            author: fields.author.unwrap_or_default(),
            year: fields.year.unwrap_or_default(),
            genre: fields.genre.unwrap_or_default(),
        };

        tracing::info!(book_id = id, "book replaced");
        Ok(book.clone())
    }

    /// Overwrite only the supplied fields of an existing book.
    pub fn update_book(&mut self, id: u64, fields: BookFields) -> Result<PatchOutcome, StoreError> {
        let book = self
            .books
            .get_mut(id)
            .ok_or_else(|| StoreError::not_found(Book::KIND, id))?;

        let before = book.clone();
        let changed_fields = fields.supplied();

        if let Some(title) = fields.title {
            book.title = title;
        }
        if let Some(author) = fields.author {
            book.author = author;
        }
        if let Some(year) = fields.year {
            book.year = year;
        }
        if let Some(genre) = fields.genre {
            book.genre = genre;
        }

        tracing::info!(book_id = id, fields = ?changed_fields, "book updated");
        Ok(PatchOutcome {
            before,
            after: book.clone(),
            changed_fields,
        })
    }

    pub fn delete_book(&mut self, id: u64) -> Result<Book, StoreError> {
        let removed = self
            .books
            .remove(id)
            .ok_or_else(|| StoreError::not_found(Book::KIND, id))?;

        tracing::info!(book_id = id, "book deleted");
        Ok(removed)
    }

    pub fn list_users(&self, query: &ListQuery) -> Vec<User> {
        self.users.list(query)
    }

    /// Requires non-empty `username` and `email`; `role` defaults to
    /// [`DEFAULT_ROLE`].
    pub fn create_user(&mut self, fields: UserFields) -> Result<User, StoreError> {
        let missing: Vec<&'static str> = [("username", &fields.username), ("email", &fields.email)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
            .map(|(name, _)| name)
            .collect();
        if !missing.is_empty() {
            return Err(StoreError::missing_fields(User::KIND, missing));
        }

        let user = self.users.insert_with(|id| User {
            id,
            username: fields.username.unwrap_or_default(),
            email: fields.email.unwrap_or_default(),
            role: fields.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        });

        tracing::info!(user_id = user.id, username = %user.username, "user created");
        Ok(user)
    }
}

fn current_year() -> i32 {
    OffsetDateTime::now_utc().year()
}

fn book(id: u64, title: &str, author: &str, year: i32, genre: &str) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        year,
        genre: genre.to_string(),
    }
}

fn seed_books() -> Vec<Book> {
    vec![
        book(1, "The Pragmatic Programmer", "Andrew Hunt", 1999, "Technology"),
        book(2, "Clean Code", "Robert C. Martin", 2008, "Technology"),
        book(3, "1984", "George Orwell", 1949, "Fiction"),
        book(4, "To Kill a Mockingbird", "Harper Lee", 1960, "Fiction"),
        book(5, "You Don't Know JS", "Kyle Simpson", 2014, "Technology"),
    ]
}

fn seed_users() -> Vec<User> {
    [(1, "alice", "admin"), (2, "bob", "student"), (3, "charlie", "teacher")]
        .into_iter()
        .map(|(id, username, role)| User {
            id,
            username: username.to_string(),
            email: format!("{username}@example.com"),
            role: role.to_string(),
        })
        .collect()
}
