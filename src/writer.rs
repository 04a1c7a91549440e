use std::fmt::Write;

use crate::{col::Column, ident::TableAliases};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> std::fmt::Result;
}

/// Rendering target plus the alias map consulted for every column reference.
pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) aliases: &'a TableAliases,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, aliases: &'a TableAliases) -> Self {
        Self { writer, aliases }
    }

    /// `<alias>.<name>` when the column's table is aliased, the bare name otherwise.
    pub(crate) fn write_column(&mut self, column: &Column) -> std::fmt::Result {
        if let Some(alias) = self.aliases.get(column.table()) {
            self.writer.write_str(alias)?;
            self.writer.write_char('.')?;
        }
        self.writer.write_str(column.name())
    }

    /// `<table> <alias>` when aliased, the table alone otherwise.
    pub(crate) fn write_table(&mut self, table: &str) -> std::fmt::Result {
        self.writer.write_str(table)?;
        if let Some(alias) = self.aliases.get(table) {
            self.writer.write_char(' ')?;
            self.writer.write_str(alias)?;
        }
        Ok(())
    }

    pub(crate) fn write_alias(&mut self, alias: Option<&str>) -> std::fmt::Result {
        if let Some(alias) = alias {
            self.writer.write_str(" as ")?;
            self.writer.write_str(alias)?;
        }
        Ok(())
    }

    pub(crate) fn qualified(&self, column: &Column) -> String {
        match self.aliases.get(column.table()) {
            Some(alias) => format!("{alias}.{}", column.name()),
            None => column.name().to_owned(),
        }
    }
}
