//! TSX parsing via swc, producing an AST plus the comments the analyzer needs
//! for suppression directives.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{
    BytePos, FileName, GLOBALS, Globals, SourceMap,
    comments::{Comment, SingleThreadedComments},
};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

pub type CommentMap = HashMap<BytePos, Vec<Comment>>;

/// Comments copied out of `SingleThreadedComments` so the parse result is
/// `Send` and can cross rayon worker boundaries.
#[derive(Debug, Clone)]
pub struct ExtractedComments {
    pub leading: CommentMap,
    pub trailing: CommentMap,
}

impl ExtractedComments {
    /// Copy out the comment maps; must happen while the parser's
    /// `SingleThreadedComments` is still alive.
    fn from_swc(comments: &SingleThreadedComments) -> Self {
        let (leading, trailing) = comments.borrow_all();
        Self {
            leading: leading.iter().map(|(k, v)| (*k, v.clone())).collect(),
            trailing: trailing.iter().map(|(k, v)| (*k, v.clone())).collect(),
        }
    }

    pub fn borrow_all(&self) -> (&CommentMap, &CommentMap) {
        (&self.leading, &self.trailing)
    }
}

/// One successfully parsed source file. Spans in the module are resolved
/// against `source_map`.
pub struct ParsedTsx {
    pub module: Module,
    pub source_map: Arc<SourceMap>,
    pub comments: ExtractedComments,
}

/// Parse TSX/JSX source text into an AST. Plain `.ts`/`.js` files parse fine
/// under the TSX syntax as long as they contain no ambiguous generics, which
/// is the case for the component sources this tool targets.
pub fn parse_tsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<ParsedTsx> {
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), Some(&comments));

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("failed to parse {file_path}: {e:?}"))?;
        let comments = ExtractedComments::from_swc(&comments);

        Ok(ParsedTsx {
            module,
            source_map,
            comments,
        })
    })
}
