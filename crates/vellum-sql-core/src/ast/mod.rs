//! The dialect-independent statement and expression tree.

mod expression;
mod statement;

pub use expression::{BinaryOp, Expr, FunctionCall, Literal, UnaryOp};
pub use statement::{
    ConflictAction, DeleteStatement, InsertSource, InsertStatement, JoinClause, JoinType,
    NullOrdering, OnConflict, OrderBy, OrderDirection, SelectColumn, SelectStatement, Statement,
    TableRef, UpdateAssignment, UpdateStatement,
};
