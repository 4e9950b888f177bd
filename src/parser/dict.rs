//! Parser for the textual header mapping
//!
//! The header text is a Python dict literal in the shape of
//! `{'descr': '<f8', 'fortran_order': False, 'shape': (100, 10), }`.
//! Keys may appear in any order; interior spacing and trailing commas are
//! tolerated so headers written by other producers still parse.

use crate::error::Error;
use crate::types::{DType, Header};

pub(crate) fn parse_dict(text: &str) -> Result<Header, Error> {
    let mut cur = Cursor::new(text);
    let mut descr = None;
    let mut fortran_order = None;
    let mut shape = None;

    cur.skip_ws();
    cur.expect('{')?;
    loop {
        cur.skip_ws();
        if cur.eat('}') {
            break;
        }
        let key = cur.quoted()?;
        cur.skip_ws();
        cur.expect(':')?;
        cur.skip_ws();
        match key {
            "descr" => {
                let literal = cur.quoted()?;
                descr = Some(
                    DType::from_descr(literal)
                        .ok_or_else(|| Error::UnknownDescr(literal.to_string()))?,
                );
            }
            "fortran_order" => fortran_order = Some(cur.boolean()?),
            "shape" => shape = Some(cur.tuple()?),
            other => {
                return Err(Error::InvalidHeader(format!("unknown key '{}'", other)));
            }
        }
        cur.skip_ws();
        cur.eat(',');
    }

    match (descr, fortran_order, shape) {
        (Some(dtype), Some(fortran_order), Some(shape)) => {
            Ok(Header::new(dtype, fortran_order, shape))
        }
        _ => Err(Error::InvalidHeader(
            "missing one of 'descr', 'fortran_order', 'shape'".to_string(),
        )),
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        // Drop the space padding and trailing newline up front
        Self {
            rest: text.trim_end(),
        }
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, c: char) -> bool {
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, c: char) -> Result<(), Error> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(Error::InvalidHeader(format!("expected '{}'", c)))
        }
    }

    /// Single- or double-quoted string literal
    fn quoted(&mut self) -> Result<&'a str, Error> {
        let quote = if self.eat('\'') {
            '\''
        } else if self.eat('"') {
            '"'
        } else {
            return Err(Error::InvalidHeader("expected string literal".to_string()));
        };
        match self.rest.find(quote) {
            Some(end) => {
                let literal = &self.rest[..end];
                self.rest = &self.rest[end + 1..];
                Ok(literal)
            }
            None => Err(Error::InvalidHeader(
                "unterminated string literal".to_string(),
            )),
        }
    }

    fn boolean(&mut self) -> Result<bool, Error> {
        for (literal, value) in [("True", true), ("False", false)] {
            if let Some(rest) = self.rest.strip_prefix(literal) {
                self.rest = rest;
                return Ok(value);
            }
        }
        Err(Error::InvalidHeader(
            "expected 'True' or 'False'".to_string(),
        ))
    }

    /// Tuple of non-negative integers, trailing comma allowed
    fn tuple(&mut self) -> Result<Vec<u64>, Error> {
        self.expect('(')?;
        let mut dims = Vec::new();
        loop {
            self.skip_ws();
            if self.eat(')') {
                break;
            }
            dims.push(self.integer()?);
            self.skip_ws();
            if !self.eat(',') {
                self.skip_ws();
                self.expect(')')?;
                break;
            }
        }
        Ok(dims)
    }

    fn integer(&mut self) -> Result<u64, Error> {
        let end = self
            .rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(Error::InvalidHeader("expected integer".to_string()));
        }
        let (digits, rest) = self.rest.split_at(end);
        self.rest = rest;
        digits
            .parse()
            .map_err(|_| Error::InvalidHeader("shape dimension out of range".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_header() {
        let header =
            parse_dict("{'descr': '<f8', 'fortran_order': False, 'shape': (100, 10), }").unwrap();
        assert_eq!(header.dtype, DType::F64);
        assert!(!header.fortran_order);
        assert_eq!(header.shape, vec![100, 10]);
    }

    #[test]
    fn one_dimensional_shape() {
        let header =
            parse_dict("{'descr': '<i4', 'fortran_order': False, 'shape': (7,), }").unwrap();
        assert_eq!(header.shape, vec![7]);
    }

    #[test]
    fn scalar_shape() {
        let header =
            parse_dict("{'descr': '<f4', 'fortran_order': False, 'shape': (), }").unwrap();
        assert!(header.shape.is_empty());
    }

    #[test]
    fn keys_in_any_order() {
        let header =
            parse_dict("{'shape': (3, 2), 'descr': '|u1', 'fortran_order': True}").unwrap();
        assert_eq!(header.dtype, DType::U8);
        assert!(header.fortran_order);
        assert_eq!(header.shape, vec![3, 2]);
    }

    #[test]
    fn double_quotes_and_padding() {
        let header = parse_dict(
            "{\"descr\": \"<u2\", \"fortran_order\": False, \"shape\": ( 4 , 5 )}       \n",
        )
        .unwrap();
        assert_eq!(header.dtype, DType::U16);
        assert_eq!(header.shape, vec![4, 5]);
    }

    #[test]
    fn unknown_key_rejected() {
        let result = parse_dict("{'descr': '<f8', 'padding': 1}");
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn unknown_descr_rejected() {
        let result = parse_dict("{'descr': '>f8', 'fortran_order': False, 'shape': (1,)}");
        assert!(matches!(result, Err(Error::UnknownDescr(_))));
    }

    #[test]
    fn missing_key_rejected() {
        let result = parse_dict("{'descr': '<f8', 'fortran_order': False}");
        assert!(matches!(result, Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn garbage_rejected() {
        assert!(parse_dict("not a dict").is_err());
        assert!(parse_dict("{'descr': '<f8'").is_err());
        assert!(parse_dict("{'descr': '<f8', 'fortran_order': maybe, 'shape': (1,)}").is_err());
    }
}
