use crate::error::{BagtagError, Result};

/// A minimal delimited-text table with a header row. Quoted fields may
/// contain commas and doubled quotes; fields never span lines. Short rows
/// are padded with empty fields.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |fields| Row {
            table: self,
            fields,
        })
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    fields: &'a [String],
}

impl Row<'_> {
    /// Field value under the named header, or "" when the column is absent.
    pub fn get(&self, name: &str) -> &str {
        self.table
            .column(name)
            .and_then(|index| self.fields.get(index))
            .map(String::as_str)
            .unwrap_or("")
    }
}

pub fn parse(text: &str) -> Result<Table> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());
    let header_line = lines
        .next()
        .ok_or_else(|| BagtagError::DatasetParse("empty dataset".to_string()))?;
    let headers = split_fields(header_line);
    let mut rows = Vec::new();
    for line in lines {
        let mut fields = split_fields(line);
        fields.resize(headers.len(), String::new());
        rows.push(fields);
    }
    Ok(Table { headers, rows })
}

fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}
