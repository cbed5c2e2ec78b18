//! `query_string` and `simple_query_string`.
//!
//! The text is parsed by [`QueryParser`] into clauses, and each clause is
//! expanded over its field, or over the default fields when it names none.
//! What a term becomes depends on the mapped type of the field: numbers and
//! dates turn into exact ranges, booleans into terms and everything else
//! into a match on the field's analyzer.

use chrono::Utc;
use log::debug;
use serde_json::Value;

use super::range::parse_date;
use super::value::{self, field_with_boost};
use super::{Body, Translator, calculate_min};
use crate::error::{QueryDslError, Result};
use crate::mapping::FieldType;
use crate::query::parser::{Clause, Node, QueryParser};
use crate::query::{
    AnalyzerRef, BooleanQuery, Boost, DateRangeQuery, ExistsQuery, FuzzyQuery, MatchPhraseQuery,
    MatchQuery, NumericRangeQuery, Occur, Operator, PrefixQuery, Query, RegexpQuery, TermQuery,
    WildcardQuery,
};

const KEYWORD_ANALYZER: &str = "keyword";

/// Decoded options shared by both query kinds.
struct QueryStringOptions<'b> {
    kind: &'static str,
    query: String,
    analyzer: Option<String>,
    fields: Vec<(String, Boost)>,
    default_operator: Operator,
    boost: Boost,
    analyze_wildcard: bool,
    lenient: bool,
    minimum_should_match: Option<&'b Value>,
}

/// Multiply two boosts, either of which may be unset.
fn combine(outer: Boost, inner: Boost) -> Boost {
    match (outer.value(), inner.value()) {
        (Some(a), Some(b)) => Boost::new(a * b),
        (Some(a), None) | (None, Some(a)) => Boost::new(a),
        (None, None) => Boost::UNSET,
    }
}

impl Translator<'_> {
    pub(super) fn query_string_query(&self, body: &Body) -> Result<Query> {
        let options = self.query_string_options("query_string", body)?;
        let parser = QueryParser::new()
            .with_default_operator(options.default_operator)
            .with_max_depth(self.options.max_depth);
        let clauses = parser.parse(&options.query)?;
        self.clauses_query(&options, &clauses, options.boost)
    }

    pub(super) fn simple_query_string_query(&self, body: &Body) -> Result<Query> {
        let options = self.query_string_options("simple_query_string", body)?;
        let parser = QueryParser::simple()
            .with_default_operator(options.default_operator)
            .with_max_depth(self.options.max_depth);
        let clauses = parser.parse(&options.query)?;
        let mut query = self.clauses_query(&options, &clauses, options.boost)?;

        if let (Some(minimum), Query::Bool(bool_query)) = (options.minimum_should_match, &mut query) {
            if !bool_query.should().is_empty() {
                let minimum = calculate_min(bool_query.should().len(), minimum)?;
                bool_query.set_minimum_should_match(minimum);
            }
        }
        Ok(query)
    }

    fn query_string_options<'b>(
        &self,
        kind: &'static str,
        body: &'b Body,
    ) -> Result<QueryStringOptions<'b>> {
        let simple = kind == "simple_query_string";
        let mut options = QueryStringOptions {
            kind,
            query: String::new(),
            analyzer: None,
            fields: Vec::new(),
            default_operator: Operator::Or,
            boost: Boost::UNSET,
            analyze_wildcard: false,
            lenient: false,
            minimum_should_match: None,
        };
        let mut fields = None;
        let mut default_field = None;

        for (key, option) in body {
            let key = key.to_lowercase();
            match key.as_str() {
                "query" => options.query = value::string(kind, &key, option)?,
                "analyzer" => options.analyzer = Some(value::string(kind, &key, option)?),
                "fields" => fields = Some(value::strings(kind, &key, option)?),
                "default_field" if !simple => {
                    default_field = Some(value::string(kind, &key, option)?)
                }
                "default_operator" => {
                    options.default_operator = value::operator(kind, &key, option)?
                }
                "boost" => options.boost = value::boost(kind, &key, option)?,
                "analyze_wildcard" => {
                    options.analyze_wildcard = value::boolean(kind, &key, option)?
                }
                "lenient" => options.lenient = value::boolean(kind, &key, option)?,
                "flags" if simple => {}
                "minimum_should_match" if simple => options.minimum_should_match = Some(option),
                _ => {
                    return Err(QueryDslError::parsing(format!(
                        "[{kind}] unsupported children {key}"
                    )));
                }
            }
        }

        options.fields = match (fields, default_field) {
            (Some(fields), _) => fields
                .iter()
                .map(|field| field_with_boost(kind, field))
                .collect::<Result<_>>()?,
            (None, Some(field)) if field != "*" => vec![(field, Boost::UNSET)],
            _ => self
                .mappings
                .fields_of_type(&[FieldType::Text, FieldType::Keyword])
                .map(|field| (field.to_string(), Boost::UNSET))
                .collect(),
        };
        debug!("[{kind}] default fields: {:?}", options.fields);
        Ok(options)
    }

    /// A group of parsed clauses. A lone positive clause stands for itself.
    fn clauses_query(
        &self,
        options: &QueryStringOptions<'_>,
        clauses: &[Clause],
        boost: Boost,
    ) -> Result<Query> {
        match clauses {
            [] => return Ok(Query::MatchNone),
            [clause] if clause.occur != Occur::MustNot => {
                let query = self.node_query(options, &clause.node)?;
                if boost.is_unset() {
                    return Ok(query);
                }
                let inner = query.boost();
                return Ok(query.with_boost(combine(boost, inner)));
            }
            _ => {}
        }

        let mut query = BooleanQuery::new().with_boost(boost);
        for clause in clauses {
            query.add_clause(clause.occur, self.node_query(options, &clause.node)?);
        }
        if query.must().is_empty() && query.should().is_empty() {
            query.add_must(Query::match_all());
        }
        Ok(query.into())
    }

    fn node_query(&self, options: &QueryStringOptions<'_>, node: &Node) -> Result<Query> {
        match node {
            Node::MatchAll => Ok(Query::match_all()),
            Node::Exists { field } => Ok(ExistsQuery::new(field.as_str()).into()),
            Node::Group { clauses, boost } => self.clauses_query(options, clauses, *boost),
            Node::Term {
                field,
                text,
                fuzziness,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                self.term_node(options, field, text, *fuzziness, boost)
            }),
            Node::Phrase {
                field,
                text,
                slop,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                Ok(MatchPhraseQuery::new(field, text.as_str())
                    .with_analyzer(self.field_analyzer(options, field)?)
                    .with_slop(*slop)
                    .with_boost(boost)
                    .into())
            }),
            Node::Prefix {
                field,
                prefix,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                let prefix = self.normalize_wildcard(options, field, prefix)?;
                Ok(PrefixQuery::new(field, prefix).with_boost(boost).into())
            }),
            Node::Wildcard {
                field,
                pattern,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                let pattern = self.normalize_wildcard(options, field, pattern)?;
                let query = WildcardQuery::new(field, pattern).with_boost(boost);
                query.compile()?;
                Ok(query.into())
            }),
            Node::Regexp {
                field,
                pattern,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                let query = RegexpQuery::new(field, pattern.as_str()).with_boost(boost);
                query.compile()?;
                Ok(query.into())
            }),
            Node::Range {
                field,
                lower,
                upper,
                include_lower,
                include_upper,
                boost,
            } => self.per_field(options, field.as_deref(), *boost, |field, boost| {
                let bounds = (lower.as_deref(), upper.as_deref(), *include_lower, *include_upper);
                self.range_node(options, field, bounds, boost)
            }),
        }
    }

    /// Build one query per target field; several fields are or-ed.
    fn per_field<F>(
        &self,
        options: &QueryStringOptions<'_>,
        field: Option<&str>,
        boost: Boost,
        build: F,
    ) -> Result<Query>
    where
        F: Fn(&str, Boost) -> Result<Query>,
    {
        if let Some(field) = field {
            return build(field, boost);
        }
        match options.fields.as_slice() {
            [] => Ok(Query::MatchNone),
            [(field, field_boost)] => build(field, combine(*field_boost, boost)),
            fields => {
                let mut query = BooleanQuery::new();
                for (field, field_boost) in fields {
                    query.add_should(build(field, combine(*field_boost, boost))?);
                }
                Ok(query.into())
            }
        }
    }

    /// The analyzer for text on `field`: the requested one, the keyword
    /// analyzer on keyword fields, else the field's own.
    fn field_analyzer(&self, options: &QueryStringOptions<'_>, field: &str) -> Result<Option<AnalyzerRef>> {
        if options.analyzer.is_none() && self.mappings.field_type(field) == Some(FieldType::Keyword) {
            return Ok(self.analyzers.lookup(KEYWORD_ANALYZER).map(AnalyzerRef::new));
        }
        self.query_analyzer(options.analyzer.as_deref(), field)
    }

    /// Run `text` through the field analyzer when it yields a single token.
    fn normalize(&self, options: &QueryStringOptions<'_>, field: &str, text: &str) -> Result<String> {
        let analyzer = self.field_analyzer(options, field)?;
        let terms = self.analyze_terms(analyzer.as_ref(), text)?;
        Ok(match <[String; 1]>::try_from(terms) {
            Ok([term]) => term,
            Err(_) => text.to_string(),
        })
    }

    fn normalize_wildcard(&self, options: &QueryStringOptions<'_>, field: &str, text: &str) -> Result<String> {
        if options.analyze_wildcard {
            self.normalize(options, field, text)
        } else {
            Ok(text.to_string())
        }
    }

    /// An error, or nothing matched when the query is lenient.
    fn lenient_error(&self, options: &QueryStringOptions<'_>, error: QueryDslError) -> Result<Query> {
        if options.lenient {
            debug!("[{}] lenient, skipping: {}", options.kind, error.reason());
            Ok(Query::MatchNone)
        } else {
            Err(error)
        }
    }

    fn term_node(
        &self,
        options: &QueryStringOptions<'_>,
        field: &str,
        text: &str,
        fuzziness: Option<u32>,
        boost: Boost,
    ) -> Result<Query> {
        let kind = options.kind;
        match self.mappings.field_type(field) {
            Some(FieldType::Numeric) => match text.parse::<f64>() {
                Ok(number) => Ok(NumericRangeQuery::exact(field, number).with_boost(boost).into()),
                Err(_) => self.lenient_error(
                    options,
                    QueryDslError::x_content_parse(format!(
                        "[{kind}] field [{field}] expects a number, got [{text}]"
                    )),
                ),
            },
            Some(FieldType::Bool) => {
                Ok(TermQuery::new(field, text.to_lowercase()).with_boost(boost).into())
            }
            Some(FieldType::Date) => {
                let (format, zone) = self.date_context(field, None, None)?;
                match parse_date(field, "term", &format, zone, &Value::from(text)) {
                    Ok(date) => Ok(DateRangeQuery::new(field, Some(date), date, true, true)
                        .with_boost(boost)
                        .into()),
                    Err(err) => self.lenient_error(options, err),
                }
            }
            _ => match fuzziness {
                Some(distance) => {
                    let term = self.normalize(options, field, text)?;
                    Ok(FuzzyQuery::new(field, term)
                        .with_fuzziness(distance)
                        .with_boost(boost)
                        .into())
                }
                None => Ok(MatchQuery::new(field, text)
                    .with_analyzer(self.field_analyzer(options, field)?)
                    .with_boost(boost)
                    .into()),
            },
        }
    }

    fn range_node(
        &self,
        options: &QueryStringOptions<'_>,
        field: &str,
        (lower, upper, include_lower, include_upper): (Option<&str>, Option<&str>, bool, bool),
        boost: Boost,
    ) -> Result<Query> {
        let kind = options.kind;
        match self.mappings.field_type(field) {
            Some(FieldType::Date) => {
                let (format, zone) = self.date_context(field, None, None)?;
                let parse = |op: &str, bound: Option<&str>| {
                    bound
                        .map(|bound| parse_date(field, op, &format, zone, &Value::from(bound)))
                        .transpose()
                };
                let bounds = parse("gt", lower).and_then(|min| Ok((min, parse("lt", upper)?)));
                match bounds {
                    Ok((min, max)) => Ok(DateRangeQuery::new(
                        field,
                        min,
                        max.unwrap_or_else(Utc::now),
                        include_lower,
                        include_upper,
                    )
                    .with_boost(boost)
                    .into()),
                    Err(err) => self.lenient_error(options, err),
                }
            }
            Some(FieldType::Numeric) | None => {
                let parse = |bound: Option<&str>| match bound {
                    Some(bound) => bound.parse::<f64>().map(Some).map_err(|_| {
                        QueryDslError::x_content_parse(format!(
                            "[{kind}] field [{field}] range bound [{bound}] is not a number"
                        ))
                    }),
                    None => Ok(None),
                };
                match parse(lower).and_then(|min| Ok((min, parse(upper)?))) {
                    Ok((min, max)) => Ok(NumericRangeQuery::new(
                        field,
                        min,
                        max,
                        include_lower,
                        include_upper,
                    )
                    .with_boost(boost)
                    .into()),
                    Err(err) => self.lenient_error(options, err),
                }
            }
            Some(other) => self.lenient_error(
                options,
                QueryDslError::x_content_parse(format!(
                    "[{kind}] field [{field}] of type [{other}] doesn't support range queries"
                )),
            ),
        }
    }
}
