use crate::{error::FieldError, field::Field, naming::ListNames};

const INDENT: &str = "  ";

///
/// ListSdl
///
/// GraphQL fragments generated for one list at compile time.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListSdl {
    /// Object type, update input, create input, then auxiliary types.
    pub types: String,

    /// Query field declarations, unindented.
    pub queries: String,

    /// Mutation field declarations, unindented.
    pub mutations: String,
}

impl ListSdl {
    pub fn generate(
        key: &str,
        names: &ListNames,
        fields: &[Box<dyn Field>],
    ) -> Result<Self, FieldError> {
        let update_lines = fragment_lines(fields.iter().filter_map(|f| f.graphql_update_args()));

        Ok(Self {
            types: types(key, fields, &update_lines)?,
            queries: queries(key, names, fields),
            mutations: mutations(key, names, !update_lines.is_empty()),
        })
    }
}

// GraphQL input objects need at least one field, so empty inputs are left out.
fn types(
    key: &str,
    fields: &[Box<dyn Field>],
    update_lines: &[String],
) -> Result<String, FieldError> {
    let mut object_lines = vec!["id: String".to_string()];
    for field in fields {
        object_lines.push(field.graphql_field_schema()?);
    }

    let create_lines = fragment_lines(fields.iter().filter_map(|f| f.graphql_create_args()));

    let mut blocks = vec![block(&format!("type {key}"), &object_lines)];
    if !update_lines.is_empty() {
        blocks.push(block(&format!("input {key}UpdateInput"), update_lines));
    }
    if !create_lines.is_empty() {
        blocks.push(block(&format!("input {key}CreateInput"), &create_lines));
    }
    blocks.extend(
        fields
            .iter()
            .filter_map(|f| f.graphql_auxiliary_types())
            .map(|fragment| normalize(&fragment))
            .filter(|fragment| !fragment.is_empty()),
    );

    Ok(blocks.join("\n\n"))
}

fn queries(key: &str, names: &ListNames, fields: &[Box<dyn Field>]) -> String {
    let mut args = vec!["search: String".to_string(), "sort: String".to_string()];
    args.extend(fragment_lines(
        fields.iter().filter_map(|f| f.graphql_query_args()),
    ));

    format!(
        "{}\n{}(id: String!): {key}",
        call(&names.list_query_name, &args, &format!("[{key}]")),
        names.item_query_name,
    )
}

fn mutations(key: &str, names: &ListNames, has_update_input: bool) -> String {
    let id = "id: String!".to_string();
    let data: Vec<String> = if has_update_input {
        vec![format!("data: {key}UpdateInput")]
    } else {
        Vec::new()
    };
    let update_args: Vec<String> = std::iter::once(id.clone()).chain(data.clone()).collect();

    [
        call(&names.delete_mutation_name, &[id], key),
        call(&names.update_mutation_name, &update_args, key),
        call(&names.create_mutation_name, &data, key),
    ]
    .join("\n")
}

// `name(\n  arg\n): Ret`, or `name: Ret` without arguments
fn call(name: &str, args: &[String], returns: &str) -> String {
    if args.is_empty() {
        return format!("{name}: {returns}");
    }

    let mut out = format!("{name}(\n");
    for arg in args {
        out.push_str(INDENT);
        out.push_str(arg);
        out.push('\n');
    }
    out.push_str("): ");
    out.push_str(returns);

    out
}

fn block(header: &str, lines: &[String]) -> String {
    let mut out = format!("{header} {{\n");
    for line in lines {
        out.push_str(INDENT);
        out.push_str(line);
        out.push('\n');
    }
    out.push('}');

    out
}

/// Split multi-line fragments into trimmed, non-empty lines.
fn fragment_lines(fragments: impl Iterator<Item = String>) -> Vec<String> {
    fragments
        .flat_map(|fragment| {
            fragment
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Re-indent a free-form SDL fragment by brace depth.
pub(crate) fn normalize(fragment: &str) -> String {
    let mut depth = 0usize;
    let mut out = Vec::new();

    for line in fragment.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if line.starts_with('}') || line.starts_with(')') {
            depth = depth.saturating_sub(1);
        }
        out.push(format!("{}{line}", INDENT.repeat(depth)));
        if line.ends_with('{') || line.ends_with('(') {
            depth += 1;
        }
    }

    out.join("\n")
}

/// Indent every line of `text` by one level.
pub(crate) fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
