#![allow(dead_code)]

use multimeth::{BoxError, Dispatcher, DEFAULT, Method, Registry};
use std::{
    fmt, io,
    sync::{Arc, Mutex},
};

// ============================================================================
// Test Value Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Str(String),
}

impl Value {
    pub fn str(s: &str) -> Self {
        Value::Str(s.to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Int(_) => "int",
            Value::Str(_) => "str",
        }
    }
}

pub type Pair = (Value, Value);

/// Classifies a pair of values by their kinds.
pub fn kinds((x, y): &Pair) -> Result<(&'static str, &'static str), BoxError> {
    Ok((x.kind(), y.kind()))
}

/// Builds the `combine` multimethod: ints multiply, strings join, anything
/// else yields null.
pub fn combine_in(registry: &Registry, name: &str) -> Dispatcher<Pair, Value> {
    let combine = Dispatcher::create_in(registry, name, kinds).unwrap();
    combine
        .bind(("int", "int"), |pair: Pair| match pair {
            (Value::Int(x), Value::Int(y)) => Ok(Value::Int(x * y)),
            other => Err(format!("not two ints: {other:?}").into()),
        })
        .unwrap();
    combine
        .bind(("str", "str"), |pair: Pair| match pair {
            (Value::Str(x), Value::Str(y)) => Ok(Value::Str(format!("{x}, {y}"))),
            other => Err(format!("not two strings: {other:?}").into()),
        })
        .unwrap();
    combine.bind(DEFAULT, |_: Pair| Ok(Value::Null)).unwrap();
    combine
}

// ============================================================================
// Test Methods and Errors
// ============================================================================

/// A method that records every argument tuple it receives.
#[derive(Clone, Default)]
pub struct RecordingMethod {
    pub received: Arc<Mutex<Vec<Pair>>>,
    pub reply: i64,
}

impl RecordingMethod {
    pub fn replying(reply: i64) -> Self {
        Self {
            received: Arc::default(),
            reply,
        }
    }

    pub fn calls(&self) -> Vec<Pair> {
        self.received.lock().unwrap().clone()
    }
}

impl Method<Pair, Value> for RecordingMethod {
    fn call(&self, args: Pair) -> Result<Value, BoxError> {
        self.received.lock().unwrap().push(args);
        Ok(Value::Int(self.reply))
    }
}

/// An intentional failure raised by user code.
#[derive(Debug, PartialEq)]
pub struct Refused(pub &'static str);

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused: {}", self.0)
    }
}

impl std::error::Error for Refused {}

// ============================================================================
// Logging
// ============================================================================

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// Lines that contain `message`.
    pub fn lines_with(&self, message: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(message))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
