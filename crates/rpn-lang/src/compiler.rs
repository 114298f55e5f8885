//! In-progress bodies for `: ... ;` and `FOR ... NEXT`.

use rpn_vm::{BodyKind, CompiledBody};

/// Stack of bodies under construction, innermost last.
#[derive(Debug, Default)]
pub struct CompilationContext {
    frames: Vec<CompiledBody>,
}

impl CompilationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        !self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Open a new innermost body; its identifier is captured from the next word.
    pub fn begin(&mut self, kind: BodyKind) {
        self.frames.push(CompiledBody::new(kind));
    }

    /// Close the innermost body.
    pub fn finish(&mut self) -> Option<CompiledBody> {
        self.frames.pop()
    }

    pub fn innermost_kind(&self) -> Option<BodyKind> {
        self.frames.last().map(CompiledBody::kind)
    }

    pub fn current_mut(&mut self) -> Option<&mut CompiledBody> {
        self.frames.last_mut()
    }

    /// True while the innermost body is still waiting for its identifier.
    pub fn needs_ident(&self) -> bool {
        self.frames.last().is_some_and(|f| f.ident().is_empty())
    }

    /// True if `name` is bound by any open body, innermost first.
    ///
    /// A word being defined binds its own name, which is what lets a body
    /// call itself.
    pub fn is_local(&self, name: &str) -> bool {
        self.frames.iter().rev().any(|f| f.binds(name))
    }

    /// Abandon every open body.
    pub fn unwind(&mut self) {
        self.frames.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_frames() {
        let mut ctx = CompilationContext::new();
        assert!(!ctx.is_active());
        ctx.begin(BodyKind::Word);
        assert!(ctx.needs_ident());
        ctx.current_mut().unwrap().set_ident("W");
        ctx.begin(BodyKind::ForLoop);
        ctx.current_mut().unwrap().set_ident("i");

        assert_eq!(ctx.depth(), 2);
        assert!(ctx.is_local("i"));
        assert!(ctx.is_local("W"));
        assert!(!ctx.is_local("j"));
        assert_eq!(ctx.innermost_kind(), Some(BodyKind::ForLoop));

        let inner = ctx.finish().unwrap();
        assert_eq!(inner.ident(), "i");
        assert!(!ctx.is_local("i"));
    }

    #[test]
    fn unwind_clears_everything() {
        let mut ctx = CompilationContext::new();
        ctx.begin(BodyKind::Word);
        ctx.begin(BodyKind::ForLoop);
        ctx.unwind();
        assert!(!ctx.is_active());
        assert_eq!(ctx.innermost_kind(), None);
    }
}
