//! Shunting-yard parser producing an expression tree.

use log::trace;

use super::node::{Call, Node, Operand};
use crate::{
    error::SyntaxErrorKind,
    ops::{Operator, CLOSE_PAREN, OPEN_PAREN},
    Environment, Error,
};

/// Entry on the operator stack.
struct Frame<'a, T> {
    op: &'a Operator<T>,
    /// Byte index of the operator in the expression.
    index: usize,
    /// For opening parens, unary operator preceding the paren.
    unary: Option<&'a Operator<T>>,
}

/// Single-use parser. All state lives in the parser instance, so concurrent or nested parses
/// never interfere with each other.
pub(super) struct Parser<'a, T> {
    env: &'a Environment<T>,
    text: &'a str,
    pos: usize,
    operands: Vec<Node<'a, T>>,
    frames: Vec<Frame<'a, T>>,
    pending_unary: Option<&'a Operator<T>>,
    /// Whether an operand (or a closed group / call) was just completed, i.e., the parser
    /// expects a binary operator.
    has_operand: bool,
    /// Whether the last completed operand is plain text that can name a function.
    can_call: bool,
}

impl<'a, T> Parser<'a, T> {
    pub fn new(env: &'a Environment<T>, text: &'a str) -> Self {
        Self {
            env,
            text,
            pos: 0,
            operands: vec![],
            frames: vec![],
            pending_unary: None,
            has_operand: false,
            can_call: false,
        }
    }

    /// Parses the expression. Returns `None` for an empty (or whitespace-only) expression.
    pub fn parse(mut self) -> Result<Option<Node<'a, T>>, Error> {
        loop {
            self.skip_whitespace();
            if self.pos >= self.text.len() {
                break;
            }

            match self.env.operators().find_next(self.text, self.pos) {
                Some((index, op)) if index == self.pos => self.push_operator(op)?,
                Some((index, _)) => self.push_operand(index)?,
                None => self.push_operand(self.text.len())?,
            }
        }
        self.finish()
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.text[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    fn error(&self, index: usize, kind: SyntaxErrorKind) -> Error {
        Error::syntax(self.text[..index].chars().count(), kind)
    }

    fn push_operand(&mut self, end: usize) -> Result<(), Error> {
        if self.has_operand {
            return Err(self.error(self.pos, SyntaxErrorKind::UnexpectedOperand));
        }
        let text = self.text[self.pos..end].trim();
        if text.is_empty() {
            return Err(self.error(self.pos, SyntaxErrorKind::EmptyOperand));
        }

        trace!("operand `{text}` at {}", self.pos);
        self.operands.push(Node::Operand(Operand {
            text,
            unary: self.pending_unary.take(),
        }));
        self.has_operand = true;
        self.can_call = true;
        self.pos = end;
        Ok(())
    }

    fn push_operator(&mut self, op: &'a Operator<T>) -> Result<(), Error> {
        let index = self.pos;
        if op.is_open_paren() {
            return if self.has_operand {
                self.push_call(index)
            } else {
                self.frames.push(Frame {
                    op,
                    index,
                    unary: self.pending_unary.take(),
                });
                self.pos += OPEN_PAREN.len();
                Ok(())
            };
        }
        if op.is_close_paren() {
            self.close_group(index)?;
            self.pos += CLOSE_PAREN.len();
            return Ok(());
        }

        if self.has_operand {
            while let Some(top) = self.frames.last() {
                if top.op.is_open_paren() || top.op.precedence() < op.precedence() {
                    break;
                }
                self.reduce()?;
            }
            self.frames.push(Frame {
                op,
                index,
                unary: None,
            });
            self.has_operand = false;
            self.can_call = false;
        } else if !op.has_unary() {
            return Err(self.error(index, SyntaxErrorKind::UnexpectedOperator));
        } else if self.pending_unary.is_some() {
            return Err(self.error(index, SyntaxErrorKind::ConsecutiveUnary));
        } else {
            trace!("unary `{}` at {index}", op.symbol());
            self.pending_unary = Some(op);
        }
        self.pos += op.symbol().len();
        Ok(())
    }

    /// Handles `name(args)` where the opening paren is located at `open_index`.
    fn push_call(&mut self, open_index: usize) -> Result<(), Error> {
        if !self.can_call {
            return Err(self.error(open_index, SyntaxErrorKind::ExpectedFunctionName));
        }
        let close_index = find_closing_paren(self.text, open_index)
            .ok_or_else(|| self.error(open_index, SyntaxErrorKind::FunctionNotClosed))?;
        let Some(Node::Operand(name)) = self.operands.pop() else {
            return Err(self.error(open_index, SyntaxErrorKind::ExpectedFunctionName));
        };
        let function = self
            .env
            .get_fn(name.text)
            .ok_or_else(|| Error::UndefinedFunction(name.text.to_owned()))?;

        let args = &self.text[open_index + OPEN_PAREN.len()..close_index];
        trace!("call `{}` with raw args `{args}`", name.text);
        self.operands.push(Node::Call(Call {
            name: name.text,
            function,
            args,
            unary: name.unary,
        }));
        self.can_call = false;
        self.pos = close_index + CLOSE_PAREN.len();
        Ok(())
    }

    fn close_group(&mut self, index: usize) -> Result<(), Error> {
        if let Some(unary) = self.pending_unary {
            let unary_index = self.text[..index].rfind(unary.symbol()).unwrap_or(index);
            return Err(self.error(unary_index, SyntaxErrorKind::DanglingUnary));
        }
        if !self.has_operand {
            let kind = match self.frames.last() {
                Some(frame) if frame.op.is_open_paren() => SyntaxErrorKind::EmptyGroup,
                Some(_) => SyntaxErrorKind::MissingOperand,
                None => SyntaxErrorKind::UnmatchedClosingParen,
            };
            return Err(self.error(index, kind));
        }

        loop {
            let frame = self
                .frames
                .pop()
                .ok_or_else(|| self.error(index, SyntaxErrorKind::UnmatchedClosingParen))?;
            if frame.op.is_open_paren() {
                if let Some(op) = frame.unary {
                    let inner = self.pop_operand(frame.index)?;
                    self.operands.push(Node::Unary {
                        op,
                        inner: Box::new(inner),
                    });
                }
                break;
            }
            self.reduce_frame(frame)?;
        }
        self.can_call = false;
        Ok(())
    }

    fn pop_operand(&mut self, index: usize) -> Result<Node<'a, T>, Error> {
        self.operands
            .pop()
            .ok_or_else(|| self.error(index, SyntaxErrorKind::InvalidExpression))
    }

    fn reduce(&mut self) -> Result<(), Error> {
        match self.frames.pop() {
            Some(frame) => self.reduce_frame(frame),
            None => Ok(()),
        }
    }

    fn reduce_frame(&mut self, frame: Frame<'a, T>) -> Result<(), Error> {
        let rhs = self.pop_operand(frame.index)?;
        let lhs = self.pop_operand(frame.index)?;
        self.operands.push(Node::Binary {
            op: frame.op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        });
        Ok(())
    }

    fn finish(mut self) -> Result<Option<Node<'a, T>>, Error> {
        let end = self.text.len();
        if self.pending_unary.is_some() {
            return Err(self.error(end, SyntaxErrorKind::DanglingUnary));
        }
        if !self.has_operand {
            if let Some(frame) = self.frames.last() {
                let kind = if frame.op.is_open_paren() {
                    SyntaxErrorKind::UnclosedParen
                } else {
                    SyntaxErrorKind::MissingOperand
                };
                return Err(self.error(frame.index, kind));
            }
        }

        while let Some(frame) = self.frames.pop() {
            if frame.op.is_open_paren() {
                return Err(self.error(frame.index, SyntaxErrorKind::UnclosedParen));
            }
            self.reduce_frame(frame)?;
        }

        let root = self.operands.pop();
        if self.operands.is_empty() {
            Ok(root)
        } else {
            Err(self.error(end, SyntaxErrorKind::InvalidExpression))
        }
    }
}

/// Finds the paren closing the one at `open_index`.
fn find_closing_paren(text: &str, open_index: usize) -> Option<usize> {
    let mut depth = 0_usize;
    for (offset, byte) in text.as_bytes()[open_index..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open_index + offset);
                }
            }
            _ => { /* not a paren */ }
        }
    }
    None
}
