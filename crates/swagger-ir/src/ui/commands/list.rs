use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use swagger_ir::intermediate::{TypeRef, Typedef, TypedefKind, Typedefs};

use crate::ui::{Colors, SpecArgs, colors::IntoComfyColor, commands::load_intermediate, term_width};

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(colors.label().comfy()));
  }
  table.set_header(row);
  table
}

pub async fn list_endpoints(args: &SpecArgs, colors: &Colors) -> anyhow::Result<()> {
  let ir = load_intermediate(args).await?;

  let mut table = new_table(colors, &["METHOD", "PATH", "OPERATION ID", "LINE"]);
  for endpoint in &ir.endpoints {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(endpoint.method.to_uppercase())
        .fg(colors.method(&endpoint.method).comfy())
        .set_alignment(CellAlignment::Right),
    );
    row.add_cell(Cell::new(&endpoint.path).fg(colors.primary().comfy()));
    row.add_cell(
      Cell::new(&endpoint.operation_id)
        .fg(colors.value().comfy())
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(
      Cell::new(endpoint.line)
        .fg(colors.info().comfy())
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}

/// Short description of a typedef use: the identifier of a named typedef or
/// the shape of an anonymous one.
fn describe(typedefs: &Typedefs, type_ref: &TypeRef) -> String {
  match typedefs.resolve(type_ref) {
    Some(typedef) if !typedef.is_anonymous() => typedef.identifier.clone(),
    Some(typedef) => summarize(typedefs, typedef),
    None => "?".to_string(),
  }
}

fn summarize(typedefs: &Typedefs, typedef: &Typedef) -> String {
  match &typedef.kind {
    TypedefKind::Primitive(primitive) if primitive.format.is_empty() => primitive.type_name.clone(),
    TypedefKind::Primitive(primitive) => format!("{} ({})", primitive.type_name, primitive.format),
    TypedefKind::Array(array) => format!("[{}]", describe(typedefs, &array.items)),
    TypedefKind::Map(map) => format!("{{string: {}}}", describe(typedefs, &map.values)),
    TypedefKind::Object(object) => format!("{} properties", object.properties.len()),
  }
}

pub async fn list_typedefs(args: &SpecArgs, colors: &Colors) -> anyhow::Result<()> {
  let ir = load_intermediate(args).await?;

  let mut table = new_table(colors, &["IDENTIFIER", "KIND", "DETAIL", "LINE"]);
  for (_, typedef) in ir.typedefs.iter() {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&typedef.identifier)
        .fg(colors.value().comfy())
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(typedef.shape()).fg(colors.accent().comfy()));
    row.add_cell(Cell::new(summarize(&ir.typedefs, typedef)).fg(colors.primary().comfy()));
    row.add_cell(
      Cell::new(typedef.line)
        .fg(colors.info().comfy())
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(row);
  }

  println!("{table}");
  Ok(())
}
