//! Query filter restricting host records by the locales of their translations.

use crate::config::is_column_reference;
use crate::error::{Error, Result};
use sqlx::{Database, Encode, QueryBuilder, Type};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operator {
    #[default]
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    NotLike,
}

impl Operator {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
            Operator::NotLike => "NOT LIKE",
        }
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "=" | "==" => Ok(Operator::Eq),
            "!=" | "<>" => Ok(Operator::NotEq),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "like" => Ok(Operator::Like),
            "not like" => Ok(Operator::NotLike),
            _ => Err(Error::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// An `EXISTS (...)` condition over the translation table.
///
/// Built through [`Translatable::where_locale`](crate::Translatable::where_locale)
/// and appended to a caller's [`QueryBuilder`] with [`WhereLocale::push_to`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereLocale {
    table: String,
    owner_type: String,
    owner_column: String,
    key: String,
    operator: Operator,
    locale: String,
}

impl WhereLocale {
    /// `owner_column` must name the outer query's host id qualified by its
    /// table (or alias); a bare `id` would bind to the translation table.
    pub(crate) fn new(
        table: &str,
        owner_type: &str,
        owner_column: &str,
        key: &str,
        operator: Operator,
        locale: &str,
    ) -> Result<Self> {
        Self {
            table: table.to_string(),
            owner_type: owner_type.to_string(),
            owner_column: String::new(),
            key: key.to_string(),
            operator,
            locale: locale.to_string(),
        }
        .on_column(owner_column)
    }

    /// Replace the outer query's host id column, e.g. `p.id` for an alias.
    pub fn on_column(mut self, column: &str) -> Result<Self> {
        if !is_column_reference(column) {
            return Err(Error::InvalidColumn(column.to_string()));
        }
        self.owner_column = column.to_string();
        Ok(self)
    }

    pub fn owner_column(&self) -> &str {
        &self.owner_column
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Append the condition to `builder`, binding all values.
    pub fn push_to<'args, DB>(&self, builder: &mut QueryBuilder<'args, DB>)
    where
        DB: Database,
        String: 'args + Encode<'args, DB> + Type<DB>,
    {
        builder.push(format!(
            "EXISTS (SELECT 1 FROM {table} AS tr WHERE tr.translatable_id = {owner} AND tr.translatable_type = ",
            table = self.table,
            owner = self.owner_column,
        ));
        builder.push_bind(self.owner_type.clone());
        builder.push(r#" AND tr."key" = "#);
        builder.push_bind(self.key.clone());
        builder.push(format!(" AND tr.locale {} ", self.operator.as_sql()));
        builder.push_bind(self.locale.clone());
        builder.push(")");
    }
}
