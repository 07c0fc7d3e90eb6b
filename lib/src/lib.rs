/*! A lexer generator completely written in Rust.

relex takes a finite, ordered list of regular expressions and synthesizes a
deterministic finite automaton (DFA) that recognizes the union of their
languages. The index of each expression in the list is its *output value*:
accepting states of the DFA report which expression matched, and when several
expressions could match, the one added first wins.

There are two main types in this crate: [`Compiler`] and [`Scanner`]. A
compiler takes expressions and produces a compiled [`Lexer`] that is passed
to the scanner for tokenizing in-memory data. The [`Lexer`] produced by the
compiler can be safely shared by multiple instances of [`Scanner`].

Compilation is a three-stage pipeline: expressions are parsed into syntax
trees (by the `relex-parser` crate), the trees are merged into a single
nondeterministic automaton with Thompson's construction, and the NFA is
turned into a DFA by subset construction followed by a pass that merges
equivalent states. The automata themselves live in the [`fsa`] module and
can be driven directly by consumers that bring their own runtime.

# Example

```rust
// Create a compiler and add the expressions to match. The first
// expression added has output value 0, the second 1, and so on.
let mut compiler = relex::Compiler::new();

compiler
    .add_pattern("int")?
    .add_pattern("[a-z]+")?
    .add_pattern("[0-9]+")?;

// Obtain the compiled lexer.
let lexer = compiler.build()?;

// Create a scanner that uses the compiled lexer and tokenize some data.
// The scanner reports the longest match at each position; `integer` is
// matched by `[a-z]+` as a whole, even though `int` matches a prefix.
let scanner = relex::Scanner::new(&lexer);

for token in scanner.scan(b"integer42") {
    let token = token?;
    println!("{}: {:?}", token.pattern(), token.range());
}
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

#![deny(missing_docs)]

pub use compiler::compile;
pub use compiler::CompileError;
pub use compiler::Compiler;
pub use compiler::Lexer;
pub use compiler::PatternId;

pub use scanner::ScanError;
pub use scanner::Scanner;
pub use scanner::Token;
pub use scanner::Tokens;

pub mod fsa;

mod compiler;
mod scanner;

#[cfg(test)]
mod tests;
