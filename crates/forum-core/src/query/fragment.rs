use std::fmt::Write;

use thiserror::Error;

/// A bind parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    BigInt(Option<i64>),
    Text(String),
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::BigInt(Some(value))
    }
}

impl From<Option<i64>> for SqlValue {
    fn from(value: Option<i64>) -> Self {
        SqlValue::BigInt(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

/// Placeholder syntax used when rendering a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `$1`, `$2`, ... (PostgreSQL).
    Dollar,
    /// `?` (SQLite, MySQL).
    Question,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FragmentError {
    #[error("template has {placeholders} placeholders but {arguments} arguments were supplied")]
    ArityMismatch {
        placeholders: usize,
        arguments: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Sql(String),
    Bind(SqlValue),
}

/// A piece of SQL paired with its ordered bind parameters.
///
/// Fragments are written by trusted code only. User input must go through
/// [`Fragment::bind`], never through [`Fragment::push`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    parts: Vec<Part>,
}

impl Fragment {
    pub fn new(sql: impl Into<String>) -> Self {
        Self::default().push(sql)
    }

    /// Build a fragment from a `?` template and its positional arguments.
    ///
    /// The template must not contain literal question marks.
    pub fn from_template(template: &str, args: Vec<SqlValue>) -> Result<Self, FragmentError> {
        let pieces: Vec<&str> = template.split('?').collect();
        let placeholders = pieces.len() - 1;
        if placeholders != args.len() {
            return Err(FragmentError::ArityMismatch {
                placeholders,
                arguments: args.len(),
            });
        }

        let mut fragment = Fragment::default();
        let mut args = args.into_iter();
        for (i, piece) in pieces.into_iter().enumerate() {
            if i > 0 {
                if let Some(value) = args.next() {
                    fragment = fragment.bind(value);
                }
            }
            fragment = fragment.push(piece);
        }
        Ok(fragment)
    }

    /// Append raw SQL text.
    pub fn push(mut self, sql: impl Into<String>) -> Self {
        let sql = sql.into();
        if sql.is_empty() {
            return self;
        }
        match self.parts.last_mut() {
            Some(Part::Sql(last)) => last.push_str(&sql),
            _ => self.parts.push(Part::Sql(sql)),
        }
        self
    }

    /// Append a placeholder bound to `value`.
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.parts.push(Part::Bind(value.into()));
        self
    }

    /// Append another fragment, keeping its binds after the ones already here.
    pub fn append(mut self, other: &Fragment) -> Self {
        for part in &other.parts {
            self = match part {
                Part::Sql(sql) => self.push(sql.as_str()),
                Part::Bind(value) => self.bind(value.clone()),
            };
        }
        self
    }

    /// Render the SQL text with numbered placeholders.
    pub fn sql(&self, style: Placeholder) -> String {
        let mut out = String::new();
        let mut n = 0;
        for part in &self.parts {
            match part {
                Part::Sql(sql) => out.push_str(sql),
                Part::Bind(_) => {
                    n += 1;
                    match style {
                        Placeholder::Dollar => {
                            let _ = write!(out, "${n}");
                        }
                        Placeholder::Question => out.push('?'),
                    }
                }
            }
        }
        out
    }

    /// Consume the fragment into SQL text and its bind list.
    pub fn build(self, style: Placeholder) -> (String, Vec<SqlValue>) {
        let sql = self.sql(style);
        let values = self
            .parts
            .into_iter()
            .filter_map(|p| match p {
                Part::Bind(value) => Some(value),
                Part::Sql(_) => None,
            })
            .collect();
        (sql, values)
    }
}
