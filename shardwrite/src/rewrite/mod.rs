//! Statement rewriting.
//!
//! The statement text is built once from the parser's tokens, then
//! resolved for every route unit together with the rewritten parameters.

pub mod builder;
pub mod error;
pub mod orchestrator;
pub mod pagination;
pub mod placeholder;
pub mod token;
pub mod unit;

pub use builder::SqlBuilder;
pub use error::Error;
pub use orchestrator::TextRewriter;
pub use placeholder::{Placeholder, Resolver};
pub use token::{Quote, Token, TokenKind};
pub use unit::RewrittenUnit;

use tracing::{debug, info};

use self::pagination::Pagination;
use crate::config::RuleSnapshot;
use crate::encrypt::rewrite_parameters;
use crate::parameter::ParameterBuilder;
use crate::route::RouteResult;
use crate::statement::Statement;
use crate::value::Value;

/// Everything known about one logical statement.
#[derive(Debug, Clone)]
pub struct RewriteContext<'a> {
    pub sql: String,
    pub statement: Statement,
    /// Sorted by offset.
    pub tokens: Vec<Token>,
    pub parameters: Vec<Value>,
    pub rules: &'a RuleSnapshot,
}

impl<'a> RewriteContext<'a> {
    pub fn new(sql: impl ToString, statement: Statement, rules: &'a RuleSnapshot) -> Self {
        Self {
            sql: sql.to_string(),
            statement,
            tokens: vec![],
            parameters: vec![],
            rules,
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_parameters(mut self, parameters: Vec<Value>) -> Self {
        self.parameters = parameters;
        self
    }
}

/// Rewrites a logical statement for every unit it's routed to.
#[derive(Debug)]
pub struct SqlRewriteEngine<'a> {
    context: &'a RewriteContext<'a>,
}

impl<'a> SqlRewriteEngine<'a> {
    pub fn new(context: &'a RewriteContext<'a>) -> Self {
        Self { context }
    }

    /// Physical statements, one per route unit, in route order.
    pub fn rewrite(&self, route: &RouteResult) -> Result<Vec<RewrittenUnit>, Error> {
        let context = self.context;
        let rules = context.rules;
        let rewrite = !route.is_single_routing();

        let mut parameters = ParameterBuilder::new(&context.statement, &context.parameters);
        rewrite_parameters(
            &rules.encrypt,
            &context.statement,
            &mut parameters,
            &context.parameters,
        )?;

        if rewrite {
            if let Some(select) = context.statement.select() {
                Pagination::new(select, rules)
                    .rewrite_parameters(&mut parameters, &context.parameters);
            }
        }

        let builder = TextRewriter::new(context, rewrite).build()?;
        let generic_parameters = parameters.generic_parameters();

        debug!(
            "rewriting for {} units [{} tokens, {} parameters]",
            route.units.len(),
            context.tokens.len(),
            context.parameters.len()
        );

        if rules.show_sql {
            info!("logic sql: {}", context.sql);
        }

        let mut units = Vec::with_capacity(route.units.len());
        for unit in &route.units {
            let resolver = Resolver::new(unit, rules.schema(&unit.data_source));
            let (sql, parameter_groups) = builder.resolve(&resolver, &parameters);

            if rules.show_sql {
                info!("actual sql: {} ::: {}", unit.data_source, sql);
            }

            units.push(RewrittenUnit {
                data_source: unit.data_source.clone(),
                sql,
                parameter_groups,
                generic_parameters: generic_parameters.clone(),
            });
        }

        Ok(units)
    }
}
