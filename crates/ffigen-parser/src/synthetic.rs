//! An in-memory translation unit.
//!
//! `SyntheticTu` implements [`AstOracle`] over plain arenas, so the
//! extractor can be driven without libclang. Nodes and types are addressed
//! by index handles handed out by the builder methods.

use ffigen_core::{Qualifiers, SymbolIdentity};

use crate::oracle::{Abi, AstOracle, LinkageKind, NodeKind, Token, TypeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// Everything the oracle can report about one node.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    pub kind: NodeKind,
    pub kind_spelling: String,
    pub spelling: String,
    pub display_name: String,
    pub identity: SymbolIdentity,
    pub ty: Option<TypeId>,
    pub underlying: Option<TypeId>,
    pub linkage: LinkageKind,
    pub enum_value: Option<i64>,
    pub tokens: Vec<Token>,
}

impl NodeSpec {
    /// A node whose display name equals its spelling and whose kind
    /// spelling is the kind's debug name.
    #[must_use]
    pub fn new(kind: NodeKind, spelling: impl Into<String>) -> Self {
        let spelling = spelling.into();
        Self {
            kind,
            kind_spelling: format!("{kind:?}"),
            display_name: spelling.clone(),
            spelling,
            identity: SymbolIdentity::anonymous(),
            ty: None,
            underlying: None,
            linkage: LinkageKind::NoLinkage,
            enum_value: None,
            tokens: Vec::new(),
        }
    }

    #[must_use]
    pub fn identity(mut self, identity: impl Into<SymbolIdentity>) -> Self {
        self.identity = identity.into();
        self
    }

    #[must_use]
    pub const fn typed(mut self, ty: TypeId) -> Self {
        self.ty = Some(ty);
        self
    }

    #[must_use]
    pub const fn underlying(mut self, ty: TypeId) -> Self {
        self.underlying = Some(ty);
        self
    }

    #[must_use]
    pub const fn linkage(mut self, linkage: LinkageKind) -> Self {
        self.linkage = linkage;
        self
    }

    #[must_use]
    pub const fn value(mut self, value: i64) -> Self {
        self.enum_value = Some(value);
        self
    }

    #[must_use]
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn kind_spelling(mut self, kind_spelling: impl Into<String>) -> Self {
        self.kind_spelling = kind_spelling.into();
        self
    }

    #[must_use]
    pub fn tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }
}

/// Everything the oracle can report about one type.
#[derive(Debug, Clone)]
pub struct TypeSpec {
    pub kind: TypeKind,
    pub kind_spelling: String,
    pub qualifiers: Qualifiers,
    pub pointee: Option<TypeId>,
    pub element: Option<TypeId>,
    pub length: Option<u64>,
    pub result: Option<TypeId>,
    pub abi: Abi,
    pub arguments: Vec<TypeId>,
    pub declaration: Option<NodeId>,
}

impl TypeSpec {
    #[must_use]
    pub fn new(kind: TypeKind) -> Self {
        Self {
            kind,
            kind_spelling: format!("{kind:?}"),
            qualifiers: Qualifiers::none(),
            pointee: None,
            element: None,
            length: None,
            result: None,
            abi: Abi::Default,
            arguments: Vec::new(),
            declaration: None,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    spec: NodeSpec,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct SyntheticTu {
    nodes: Vec<Node>,
    types: Vec<TypeSpec>,
}

impl Default for SyntheticTu {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticTu {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                spec: NodeSpec::new(NodeKind::TranslationUnit, "synthetic.h"),
                children: Vec::new(),
            }],
            types: Vec::new(),
        }
    }

    // ── Nodes ──────────────────────────────────────────────────────

    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a child node under `parent`.
    ///
    /// # Panics
    /// Panics if `parent` was not handed out by this unit.
    pub fn add_node(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            spec,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn struct_decl(&mut self, parent: NodeId, name: &str, identity: &str) -> NodeId {
        self.add_node(parent, NodeSpec::new(NodeKind::StructDecl, name).identity(identity))
    }

    pub fn union_decl(&mut self, parent: NodeId, name: &str, identity: &str) -> NodeId {
        self.add_node(parent, NodeSpec::new(NodeKind::UnionDecl, name).identity(identity))
    }

    pub fn enum_decl(&mut self, parent: NodeId, name: &str, identity: &str) -> NodeId {
        self.add_node(parent, NodeSpec::new(NodeKind::EnumDecl, name).identity(identity))
    }

    pub fn field(&mut self, parent: NodeId, name: &str, ty: TypeId) -> NodeId {
        self.add_node(parent, NodeSpec::new(NodeKind::FieldDecl, name).typed(ty))
    }

    pub fn enumerator(
        &mut self,
        parent: NodeId,
        name: &str,
        identity: &str,
        value: i64,
        ty: TypeId,
    ) -> NodeId {
        self.add_node(
            parent,
            NodeSpec::new(NodeKind::EnumConstantDecl, name)
                .identity(identity)
                .typed(ty)
                .value(value),
        )
    }

    pub fn typedef_decl(
        &mut self,
        parent: NodeId,
        name: &str,
        identity: &str,
        underlying: TypeId,
    ) -> NodeId {
        self.add_node(
            parent,
            NodeSpec::new(NodeKind::TypedefDecl, name)
                .identity(identity)
                .underlying(underlying),
        )
    }

    pub fn function_decl(
        &mut self,
        parent: NodeId,
        name: &str,
        identity: &str,
        ty: TypeId,
    ) -> NodeId {
        self.add_node(
            parent,
            NodeSpec::new(NodeKind::FunctionDecl, name)
                .identity(identity)
                .typed(ty)
                .linkage(LinkageKind::External),
        )
    }

    pub fn param(&mut self, parent: NodeId, name: &str, ty: TypeId) -> NodeId {
        self.add_node(parent, NodeSpec::new(NodeKind::ParmDecl, name).typed(ty))
    }

    pub fn variable(
        &mut self,
        parent: NodeId,
        name: &str,
        identity: &str,
        ty: TypeId,
        linkage: LinkageKind,
    ) -> NodeId {
        self.add_node(
            parent,
            NodeSpec::new(NodeKind::VarDecl, name)
                .identity(identity)
                .typed(ty)
                .linkage(linkage),
        )
    }

    /// A macro definition whose extent is the name followed by `body`.
    pub fn macro_definition(
        &mut self,
        parent: NodeId,
        name: &str,
        identity: &str,
        body: &[Token],
    ) -> NodeId {
        let mut tokens = Vec::with_capacity(body.len() + 1);
        tokens.push(Token::identifier(name));
        tokens.extend_from_slice(body);
        self.add_node(
            parent,
            NodeSpec::new(NodeKind::MacroDefinition, name)
                .identity(identity)
                .tokens(tokens),
        )
    }

    // ── Types ──────────────────────────────────────────────────────

    pub fn add_type(&mut self, spec: TypeSpec) -> TypeId {
        let id = TypeId(self.types.len());
        self.types.push(spec);
        id
    }

    pub fn primitive(&mut self, kind: TypeKind) -> TypeId {
        self.add_type(TypeSpec::new(kind))
    }

    /// A type of `kind` with no structure and no declaration.
    pub fn opaque(&mut self, kind: TypeKind, kind_spelling: &str) -> TypeId {
        self.add_type(TypeSpec {
            kind_spelling: kind_spelling.to_string(),
            ..TypeSpec::new(kind)
        })
    }

    /// A copy of `ty` carrying `qualifiers`.
    pub fn qualified(&mut self, ty: TypeId, qualifiers: Qualifiers) -> TypeId {
        let spec = TypeSpec {
            qualifiers,
            ..self.types[ty.0].clone()
        };
        self.add_type(spec)
    }

    /// A copy of `ty` reporting a different kind.
    pub fn reclassified(&mut self, ty: TypeId, kind: TypeKind, kind_spelling: &str) -> TypeId {
        let spec = TypeSpec {
            kind,
            kind_spelling: kind_spelling.to_string(),
            ..self.types[ty.0].clone()
        };
        self.add_type(spec)
    }

    pub fn pointer_to(&mut self, pointee: TypeId) -> TypeId {
        self.add_type(TypeSpec {
            pointee: Some(pointee),
            ..TypeSpec::new(TypeKind::Pointer)
        })
    }

    pub fn array_of(&mut self, element: TypeId, length: u64) -> TypeId {
        self.add_type(TypeSpec {
            element: Some(element),
            length: Some(length),
            ..TypeSpec::new(TypeKind::ConstantArray)
        })
    }

    pub fn function(&mut self, result: TypeId, arguments: &[TypeId], abi: Abi) -> TypeId {
        self.add_type(TypeSpec {
            result: Some(result),
            arguments: arguments.to_vec(),
            abi,
            ..TypeSpec::new(TypeKind::FunctionProto)
        })
    }

    /// The type named by a declaration (`struct point`, a typedef name, ...).
    pub fn declared(&mut self, declaration: NodeId) -> TypeId {
        self.add_type(TypeSpec {
            kind_spelling: "Record".to_string(),
            declaration: Some(declaration),
            ..TypeSpec::new(TypeKind::Other)
        })
    }

    fn node(&self, id: NodeId) -> &NodeSpec {
        &self.nodes[id.0].spec
    }

    fn ty(&self, id: TypeId) -> &TypeSpec {
        &self.types[id.0]
    }
}

impl AstOracle for SyntheticTu {
    type Node = NodeId;
    type Type = TypeId;

    fn root(&self) -> NodeId {
        Self::root(self)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.nodes[node.0].children.clone()
    }

    fn node_kind(&self, node: &NodeId) -> NodeKind {
        self.node(*node).kind
    }

    fn node_kind_spelling(&self, node: &NodeId) -> String {
        self.node(*node).kind_spelling.clone()
    }

    fn spelling(&self, node: &NodeId) -> String {
        self.node(*node).spelling.clone()
    }

    fn display_name(&self, node: &NodeId) -> String {
        self.node(*node).display_name.clone()
    }

    fn identity(&self, node: &NodeId) -> SymbolIdentity {
        self.node(*node).identity.clone()
    }

    fn node_type(&self, node: &NodeId) -> Option<TypeId> {
        self.node(*node).ty
    }

    fn typedef_underlying_type(&self, node: &NodeId) -> Option<TypeId> {
        self.node(*node).underlying
    }

    fn linkage(&self, node: &NodeId) -> LinkageKind {
        self.node(*node).linkage
    }

    fn enum_constant_value(&self, node: &NodeId) -> Option<i64> {
        self.node(*node).enum_value
    }

    fn tokens(&self, node: &NodeId) -> Vec<Token> {
        self.node(*node).tokens.clone()
    }

    fn type_kind(&self, ty: &TypeId) -> TypeKind {
        self.ty(*ty).kind
    }

    fn type_kind_spelling(&self, ty: &TypeId) -> String {
        self.ty(*ty).kind_spelling.clone()
    }

    fn qualifiers(&self, ty: &TypeId) -> Qualifiers {
        self.ty(*ty).qualifiers
    }

    fn pointee(&self, ty: &TypeId) -> Option<TypeId> {
        self.ty(*ty).pointee
    }

    fn element(&self, ty: &TypeId) -> Option<TypeId> {
        self.ty(*ty).element
    }

    fn array_length(&self, ty: &TypeId) -> Option<u64> {
        self.ty(*ty).length
    }

    fn result_type(&self, ty: &TypeId) -> Option<TypeId> {
        self.ty(*ty).result
    }

    fn calling_convention(&self, ty: &TypeId) -> Abi {
        self.ty(*ty).abi
    }

    fn argument_types(&self, ty: &TypeId) -> Vec<TypeId> {
        self.ty(*ty).arguments.clone()
    }

    fn declaration(&self, ty: &TypeId) -> Option<NodeId> {
        self.ty(*ty).declaration
    }
}
