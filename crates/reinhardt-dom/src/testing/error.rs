//! Host faults raised by the mock host.

use thiserror::Error;

/// A misuse the mock host refuses, mirroring the exception a browser would throw.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
	/// Property access on `null` or `undefined`.
	#[error("TypeError: cannot access property '{property}' of {receiver}")]
	NullDereference {
		/// `"null"` or `"undefined"`.
		receiver: &'static str,
		/// The property or method name.
		property: String,
	},
	/// Calling a name that is not a method of the receiver.
	#[error("TypeError: {receiver}.{method} is not a function")]
	NotAFunction {
		/// Interface name of the receiver.
		receiver: &'static str,
		/// The method name.
		method: String,
	},
	/// Writing a property the mock host does not model.
	#[error("TypeError: cannot set property '{property}' of {receiver}")]
	UnsupportedProperty {
		/// Interface name of the receiver.
		receiver: &'static str,
		/// The property name.
		property: String,
	},
	/// `new` on a value that is not a constructor.
	#[error("TypeError: {0} is not a constructor")]
	NotAConstructor(&'static str),
	/// An argument of the wrong kind.
	#[error("TypeError: {0}")]
	InvalidArgument(String),
	/// A selector the mock host cannot parse.
	#[error("SyntaxError: '{0}' is not a valid selector")]
	InvalidSelector(String),
	/// An empty class token.
	#[error("SyntaxError: the token provided must not be empty")]
	EmptyToken,
	/// A class token containing whitespace.
	#[error("InvalidCharacterError: the token '{0}' contains HTML space characters")]
	InvalidToken(String),
	/// Appending a node into itself or one of its descendants.
	#[error("HierarchyRequestError: the new child element contains the parent")]
	HierarchyRequest,
	/// `removeChild` with a node that is not a child.
	#[error("NotFoundError: the node to be removed is not a child of this node")]
	NotAChild,
	/// A callback invoked after its closure was released.
	#[error("InvalidStateError: callback #{0} invoked after it was released")]
	ReleasedCallback(usize),
	/// A value from one mock host passed to another.
	#[error("WrongDocumentError: the value belongs to a different mock host")]
	ForeignRealm,
	/// Global lookup with no mock host installed on this thread.
	#[error("ReferenceError: no mock host is installed on this thread")]
	NoGlobal,
}

/// Raises `error` as a host fault.
///
/// The browser equivalent is a thrown exception that nothing in this crate
/// catches; the mock host panics instead.
#[track_caller]
pub(crate) fn fault(error: HostError) -> ! {
	panic!("host fault: {error}")
}
