//! The node interpreter: statement tree to SQL text plus ordered parameters.

use crate::ast::{
    BinaryOp, ConflictAction, DeleteStatement, Expr, FunctionCall, InsertSource, InsertStatement,
    JoinClause, Literal, OrderBy, SelectColumn, SelectStatement, Statement, TableRef, UnaryOp,
    UpdateAssignment, UpdateStatement,
};
use crate::dialect::Dialect;
use crate::error::{InterpretError, Result};
use crate::types::{BindingMode, TypeDefinitionRegistry};
use crate::value::SqlValue;

use super::options::InterpreterOptions;

/// The result of interpreting one statement tree: dialect SQL text and the
/// parameter values in left-to-right traversal order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledStatement {
    /// The SQL text.
    pub sql: String,
    /// Bound parameter values, in placeholder order.
    pub params: Vec<SqlValue>,
}

/// Interprets a statement tree into dialect SQL.
///
/// The effective type-definition registry is the one bound to `options` if
/// present, else `ambient`; with neither, interpretation fails with
/// [`InterpretError::MissingTypeRegistry`] before any text is produced.
/// Capability violations abort interpretation, so a caller never observes a
/// partial statement.
pub fn interpret<D: Dialect>(
    dialect: &D,
    statement: &Statement,
    options: &InterpreterOptions,
    ambient: Option<&TypeDefinitionRegistry>,
) -> Result<CompiledStatement> {
    NodeInterpreter::new(dialect, options, ambient)?.interpret(statement)
}

/// Walks a statement tree and emits SQL text bottom-up.
///
/// A pure function of its inputs: the same tree and options always produce
/// byte-identical text and parameter order.
pub struct NodeInterpreter<'a, D: Dialect> {
    dialect: &'a D,
    options: &'a InterpreterOptions,
    registry: &'a TypeDefinitionRegistry,
    sql: String,
    params: Vec<SqlValue>,
}

impl<'a, D: Dialect> NodeInterpreter<'a, D> {
    /// Creates an interpreter, resolving the effective registry.
    pub fn new(
        dialect: &'a D,
        options: &'a InterpreterOptions,
        ambient: Option<&'a TypeDefinitionRegistry>,
    ) -> Result<Self> {
        let registry = options.effective_registry(ambient)?;
        Ok(Self {
            dialect,
            options,
            registry,
            sql: String::new(),
            params: Vec::new(),
        })
    }

    /// Interprets one statement tree.
    pub fn interpret(mut self, statement: &Statement) -> Result<CompiledStatement> {
        self.statement(statement)?;
        Ok(CompiledStatement {
            sql: self.sql,
            params: self.params,
        })
    }

    fn statement(&mut self, statement: &Statement) -> Result<()> {
        match statement {
            Statement::Select(s) => self.select(s),
            Statement::Insert(i) => self.insert(i),
            Statement::Update(u) => self.update(u),
            Statement::Delete(d) => self.delete(d),
        }
    }

    fn select(&mut self, s: &SelectStatement) -> Result<()> {
        self.sql.push_str("SELECT ");
        if s.distinct {
            self.sql.push_str("DISTINCT ");
        }
        if s.columns.is_empty() {
            self.sql.push('*');
        } else {
            for (i, column) in s.columns.iter().enumerate() {
                if i > 0 {
                    self.sql.push_str(", ");
                }
                self.select_column(column)?;
            }
        }
        if let Some(from) = &s.from {
            self.sql.push_str(" FROM ");
            self.table_ref(from)?;
        }
        if let Some(where_clause) = &s.where_clause {
            self.sql.push_str(" WHERE ");
            self.expr(where_clause)?;
        }
        if !s.group_by.is_empty() {
            self.sql.push_str(" GROUP BY ");
            for (i, expr) in s.group_by.iter().enumerate() {
                if i > 0 {
                    self.sql.push_str(", ");
                }
                self.expr(expr)?;
            }
        }
        if let Some(having) = &s.having {
            self.sql.push_str(" HAVING ");
            self.expr(having)?;
        }
        self.order_by_clause(&s.order_by)?;
        if let Some(limit) = &s.limit {
            self.sql.push_str(" LIMIT ");
            self.expr(limit)?;
        }
        if let Some(offset) = &s.offset {
            self.sql.push_str(" OFFSET ");
            self.expr(offset)?;
        }
        Ok(())
    }

    fn insert(&mut self, i: &InsertStatement) -> Result<()> {
        if i.on_conflict.is_some() {
            self.extension("ON CONFLICT")?;
        }
        if !i.returning.is_empty() {
            self.extension("RETURNING")?;
        }

        self.sql.push_str("INSERT INTO ");
        self.qualified_name(i.schema.as_deref(), &i.table);
        if !i.columns.is_empty() {
            self.sql.push_str(" (");
            for (idx, column) in i.columns.iter().enumerate() {
                if idx > 0 {
                    self.sql.push_str(", ");
                }
                self.identifier(column);
            }
            self.sql.push(')');
        }
        match &i.source {
            InsertSource::Values(rows) => {
                self.sql.push_str(" VALUES ");
                for (r, row) in rows.iter().enumerate() {
                    if r > 0 {
                        self.sql.push_str(", ");
                    }
                    self.sql.push('(');
                    for (c, value) in row.iter().enumerate() {
                        if c > 0 {
                            self.sql.push_str(", ");
                        }
                        self.expr(value)?;
                    }
                    self.sql.push(')');
                }
            }
            InsertSource::Query(query) => {
                self.sql.push(' ');
                self.select(query)?;
            }
            InsertSource::DefaultValues => self.sql.push_str(" DEFAULT VALUES"),
        }
        if let Some(on_conflict) = &i.on_conflict {
            self.sql.push_str(" ON CONFLICT");
            if !on_conflict.columns.is_empty() {
                self.sql.push_str(" (");
                for (idx, column) in on_conflict.columns.iter().enumerate() {
                    if idx > 0 {
                        self.sql.push_str(", ");
                    }
                    self.identifier(column);
                }
                self.sql.push(')');
            }
            match &on_conflict.action {
                ConflictAction::DoNothing => self.sql.push_str(" DO NOTHING"),
                ConflictAction::DoUpdate(assignments) => {
                    self.sql.push_str(" DO UPDATE SET ");
                    self.assignments(assignments)?;
                }
            }
        }
        self.returning_clause(&i.returning)?;
        Ok(())
    }

    fn update(&mut self, u: &UpdateStatement) -> Result<()> {
        // Capability validation happens before the first token is emitted.
        if u.from.is_some() && !self.options.is_update_from_enabled() {
            return Err(InterpretError::DialectCapability {
                construct: "UPDATE FROM",
            });
        }
        if u.limit.is_some() && !self.options.is_update_or_delete_limit_enabled() {
            return Err(InterpretError::DialectCapability {
                construct: "UPDATE LIMIT",
            });
        }
        if !u.returning.is_empty() {
            self.extension("RETURNING")?;
        }

        self.sql.push_str("UPDATE ");
        self.qualified_name(u.schema.as_deref(), &u.table);
        if let Some(alias) = &u.alias {
            self.sql.push_str(" AS ");
            self.identifier(alias);
        }
        self.sql.push_str(" SET ");
        self.assignments(&u.assignments)?;
        if let Some(from) = &u.from {
            self.sql.push_str(" FROM ");
            self.table_ref(from)?;
        }
        if let Some(where_clause) = &u.where_clause {
            self.sql.push_str(" WHERE ");
            self.expr(where_clause)?;
        }
        self.returning_clause(&u.returning)?;
        self.order_by_clause(&u.order_by)?;
        if let Some(limit) = &u.limit {
            self.sql.push_str(" LIMIT ");
            self.expr(limit)?;
        }
        Ok(())
    }

    fn delete(&mut self, d: &DeleteStatement) -> Result<()> {
        if d.limit.is_some() && !self.options.is_update_or_delete_limit_enabled() {
            return Err(InterpretError::DialectCapability {
                construct: "DELETE LIMIT",
            });
        }
        if !d.returning.is_empty() {
            self.extension("RETURNING")?;
        }

        self.sql.push_str("DELETE FROM ");
        self.qualified_name(d.schema.as_deref(), &d.table);
        if let Some(alias) = &d.alias {
            self.sql.push_str(" AS ");
            self.identifier(alias);
        }
        if let Some(where_clause) = &d.where_clause {
            self.sql.push_str(" WHERE ");
            self.expr(where_clause)?;
        }
        self.returning_clause(&d.returning)?;
        self.order_by_clause(&d.order_by)?;
        if let Some(limit) = &d.limit {
            self.sql.push_str(" LIMIT ");
            self.expr(limit)?;
        }
        Ok(())
    }

    fn table_ref(&mut self, table_ref: &TableRef) -> Result<()> {
        match table_ref {
            TableRef::Table {
                schema,
                name,
                alias,
            } => {
                self.qualified_name(schema.as_deref(), name);
                if let Some(alias) = alias {
                    self.sql.push_str(" AS ");
                    self.identifier(alias);
                }
                Ok(())
            }
            TableRef::Subquery { query, alias } => {
                self.sql.push('(');
                self.select(query)?;
                self.sql.push_str(") AS ");
                self.identifier(alias);
                Ok(())
            }
            TableRef::Join { left, join } => {
                self.table_ref(left)?;
                self.join_clause(join)
            }
        }
    }

    fn join_clause(&mut self, join: &JoinClause) -> Result<()> {
        self.sql.push(' ');
        self.sql.push_str(join.join_type.as_str());
        self.sql.push(' ');
        self.table_ref(&join.table)?;
        if let Some(on) = &join.on {
            self.sql.push_str(" ON ");
            self.expr(on)?;
        }
        Ok(())
    }

    fn select_column(&mut self, column: &SelectColumn) -> Result<()> {
        self.expr(&column.expr)?;
        if let Some(alias) = &column.alias {
            self.sql.push_str(" AS ");
            self.identifier(alias);
        }
        Ok(())
    }

    fn assignments(&mut self, assignments: &[UpdateAssignment]) -> Result<()> {
        for (i, assignment) in assignments.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.identifier(&assignment.column);
            self.sql.push_str(" = ");
            self.expr(&assignment.value)?;
        }
        Ok(())
    }

    fn returning_clause(&mut self, returning: &[SelectColumn]) -> Result<()> {
        if returning.is_empty() {
            return Ok(());
        }
        self.sql.push_str(" RETURNING ");
        for (i, column) in returning.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.select_column(column)?;
        }
        Ok(())
    }

    fn order_by_clause(&mut self, order_by: &[OrderBy]) -> Result<()> {
        if order_by.is_empty() {
            return Ok(());
        }
        self.sql.push_str(" ORDER BY ");
        for (i, entry) in order_by.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.expr(&entry.expr)?;
            self.sql.push(' ');
            self.sql.push_str(entry.direction.as_str());
            if let Some(nulls) = entry.nulls {
                self.sql.push(' ');
                self.sql.push_str(nulls.as_str());
            }
        }
        Ok(())
    }

    fn expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Literal(literal) => self.literal(literal),
            Expr::Column { table, name } => {
                if let Some(table) = table {
                    self.identifier(table);
                    self.sql.push('.');
                }
                self.identifier(name);
                Ok(())
            }
            Expr::Binary { left, op, right } => {
                if op.is_extension() {
                    self.extension(op.as_str())?;
                }
                self.operand(left, *op, false)?;
                self.sql.push(' ');
                self.sql.push_str(op.as_str());
                self.sql.push(' ');
                self.operand(right, *op, true)
            }
            Expr::Unary { op, operand } => {
                self.sql.push_str(op.as_str());
                if matches!(op, UnaryOp::Not) {
                    self.sql.push(' ');
                }
                self.grouped(operand)
            }
            Expr::Function(call) => self.function(call),
            Expr::Subquery(query) => {
                self.sql.push('(');
                self.select(query)?;
                self.sql.push(')');
                Ok(())
            }
            Expr::IsNull { expr, negated } => {
                self.grouped(expr)?;
                self.sql
                    .push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
                Ok(())
            }
            Expr::In {
                expr,
                list,
                negated,
            } => {
                self.grouped(expr)?;
                self.sql.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        self.sql.push_str(", ");
                    }
                    self.expr(item)?;
                }
                self.sql.push(')');
                Ok(())
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.grouped(expr)?;
                self.sql
                    .push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.grouped(low)?;
                self.sql.push_str(" AND ");
                self.grouped(high)
            }
            Expr::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                self.sql.push_str("CASE");
                if let Some(operand) = operand {
                    self.sql.push(' ');
                    self.expr(operand)?;
                }
                for (when, then) in when_clauses {
                    self.sql.push_str(" WHEN ");
                    self.expr(when)?;
                    self.sql.push_str(" THEN ");
                    self.expr(then)?;
                }
                if let Some(else_clause) = else_clause {
                    self.sql.push_str(" ELSE ");
                    self.expr(else_clause)?;
                }
                self.sql.push_str(" END");
                Ok(())
            }
            Expr::Cast { expr, ty } => {
                let column_type = self
                    .registry
                    .get(*ty)
                    .ok_or(InterpretError::UnsupportedType(*ty))?
                    .column_type()
                    .to_string();
                self.sql.push_str("CAST(");
                self.expr(expr)?;
                self.sql.push_str(" AS ");
                self.sql.push_str(&column_type);
                self.sql.push(')');
                Ok(())
            }
            Expr::Paren(inner) => {
                self.sql.push('(');
                self.expr(inner)?;
                self.sql.push(')');
                Ok(())
            }
            Expr::Wildcard { table } => {
                if let Some(table) = table {
                    self.identifier(table);
                    self.sql.push('.');
                }
                self.sql.push('*');
                Ok(())
            }
        }
    }

    fn function(&mut self, call: &FunctionCall) -> Result<()> {
        self.sql.push_str(&call.name);
        self.sql.push('(');
        if call.distinct {
            self.sql.push_str("DISTINCT ");
        }
        for (i, arg) in call.args.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.expr(arg)?;
        }
        self.sql.push(')');
        Ok(())
    }

    /// Emits a binary operand, parenthesizing when the operand binds looser
    /// than its parent (or equally, on the right: operators here associate
    /// left).
    fn operand(&mut self, expr: &Expr, parent: BinaryOp, is_right: bool) -> Result<()> {
        let needs_parens = match expr {
            Expr::Binary { op, .. } => {
                op.precedence() < parent.precedence()
                    || (op.precedence() == parent.precedence() && is_right)
            }
            _ => false,
        };
        if needs_parens {
            self.sql.push('(');
            self.expr(expr)?;
            self.sql.push(')');
            Ok(())
        } else {
            self.expr(expr)
        }
    }

    /// Emits an expression, parenthesizing bare binary expressions so they
    /// cannot capture a surrounding keyword operator.
    fn grouped(&mut self, expr: &Expr) -> Result<()> {
        if matches!(expr, Expr::Binary { .. }) {
            self.sql.push('(');
            self.expr(expr)?;
            self.sql.push(')');
            Ok(())
        } else {
            self.expr(expr)
        }
    }

    fn literal(&mut self, literal: &Literal) -> Result<()> {
        let Some(ty) = literal.logical_type() else {
            // NULL is type-less and never parameterized.
            self.sql.push_str("NULL");
            return Ok(());
        };
        let definition = self
            .registry
            .get(ty)
            .ok_or(InterpretError::UnsupportedType(ty))?;
        match definition.binding() {
            BindingMode::Parameter => {
                self.sql.push_str(self.dialect.parameter_placeholder());
                self.params.push(SqlValue::from(literal));
            }
            BindingMode::Inline => {
                let rendered = definition.render_literal(&SqlValue::from(literal));
                self.sql.push_str(&rendered);
            }
        }
        Ok(())
    }

    fn qualified_name(&mut self, schema: Option<&str>, name: &str) {
        if let Some(schema) = schema {
            self.identifier(schema);
            self.sql.push('.');
        }
        self.identifier(name);
    }

    fn identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    fn extension(&self, construct: &'static str) -> Result<()> {
        if self.options.is_strict() {
            Err(InterpretError::DialectCapability { construct })
        } else {
            Ok(())
        }
    }
}
