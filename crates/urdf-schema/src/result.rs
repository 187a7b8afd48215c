#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
    Leaf(String),
    Group(Vec<ErrorNode>),
}

impl ErrorNode {
    pub fn leaf(message: impl Into<String>) -> Self {
        ErrorNode::Leaf(message.into())
    }

    pub fn leaves(nodes: &[ErrorNode]) -> Vec<&str> {
        let mut out = Vec::new();
        for node in nodes {
            match node {
                ErrorNode::Leaf(message) => out.push(message.as_str()),
                ErrorNode::Group(children) => out.extend(ErrorNode::leaves(children)),
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Extracted<T> {
    Success(T),
    Failure(Vec<ErrorNode>),
}

impl<T> Extracted<T> {
    pub fn fail(message: impl Into<String>) -> Self {
        Extracted::Failure(vec![ErrorNode::leaf(message)])
    }

    pub fn fail_within(message: impl Into<String>, errors: Vec<ErrorNode>) -> Self {
        Extracted::Failure(vec![ErrorNode::leaf(message), ErrorNode::Group(errors)])
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Extracted::Success(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Extracted<U> {
        match self {
            Extracted::Success(value) => Extracted::Success(f(value)),
            Extracted::Failure(errors) => Extracted::Failure(errors),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Extracted<U>) -> Extracted<U> {
        match self {
            Extracted::Success(value) => f(value),
            Extracted::Failure(errors) => Extracted::Failure(errors),
        }
    }

    pub fn within(self, message: impl FnOnce() -> String) -> Extracted<T> {
        match self {
            Extracted::Success(value) => Extracted::Success(value),
            Extracted::Failure(errors) => Extracted::fail_within(message(), errors),
        }
    }

    pub fn into_result(self) -> Result<T, Vec<ErrorNode>> {
        match self {
            Extracted::Success(value) => Ok(value),
            Extracted::Failure(errors) => Err(errors),
        }
    }
}
