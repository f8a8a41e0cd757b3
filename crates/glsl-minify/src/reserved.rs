//! Reserved GLSL names.
//!
//! Every name listed here is mapped to itself when a symbol table is created,
//! so the renamer never shortens a language keyword, type, qualifier or
//! built-in function.

/// Prefix of engine-provided variables (`gl_Position`, `gl_FragColor`, ...).
///
/// Identifiers starting with this prefix are emitted unchanged and never enter the symbol table.
pub const BUILTIN_PREFIX: &str = "gl_";

/// Keywords, types, qualifiers and built-in functions of GLSL ES 1.00 and 3.00.
pub const RESERVED_WORDS: &[&str] = &[
    // Storage and interface qualifiers
    "attribute", "const", "uniform", "varying", "buffer", "shared", "in", "out", "inout", "centroid", "flat", "smooth",
    "noperspective", "layout", "invariant", "precise", "coherent", "volatile", "restrict", "readonly", "writeonly",
    // Layout qualifier identifiers
    "location", "binding", "std140", "std430", "row_major", "column_major", "index", "offset", "component",
    "early_fragment_tests",
    // Precision
    "precision", "lowp", "mediump", "highp",
    // Control flow
    "break", "continue", "do", "for", "while", "switch", "case", "default", "if", "else", "discard", "return",
    // Scalar, vector and matrix types
    "void", "bool", "int", "uint", "float", "double", "true", "false", "struct",
    "vec2", "vec3", "vec4", "ivec2", "ivec3", "ivec4", "uvec2", "uvec3", "uvec4", "bvec2", "bvec3", "bvec4",
    "dvec2", "dvec3", "dvec4",
    "mat2", "mat3", "mat4", "mat2x2", "mat2x3", "mat2x4", "mat3x2", "mat3x3", "mat3x4", "mat4x2", "mat4x3", "mat4x4",
    // Opaque types
    "sampler2D", "sampler3D", "samplerCube", "sampler2DShadow", "samplerCubeShadow", "sampler2DArray",
    "sampler2DArrayShadow", "isampler2D", "isampler3D", "isamplerCube", "isampler2DArray", "usampler2D",
    "usampler3D", "usamplerCube", "usampler2DArray", "samplerExternalOES",
    // Reserved for future use
    "asm", "class", "union", "enum", "typedef", "template", "this", "packed", "goto", "inline", "noinline",
    "public", "static", "extern", "external", "interface", "long", "short", "half", "fixed", "unsigned",
    "superp", "input", "output", "hvec2", "hvec3", "hvec4", "fvec2", "fvec3", "fvec4", "sampler1D",
    "sampler1DShadow", "sampler2DRect", "sampler3DRect", "sampler2DRectShadow", "sizeof", "cast", "namespace",
    "using", "filter", "image1D", "image2D", "image3D", "imageCube", "resource", "subroutine", "patch", "sample",
    // Entry point
    "main",
    // Angle and trigonometry functions
    "radians", "degrees", "sin", "cos", "tan", "asin", "acos", "atan", "sinh", "cosh", "tanh", "asinh", "acosh",
    "atanh",
    // Exponential functions
    "pow", "exp", "log", "exp2", "log2", "sqrt", "inversesqrt",
    // Common functions
    "abs", "sign", "floor", "trunc", "round", "roundEven", "ceil", "fract", "mod", "modf", "min", "max", "clamp",
    "mix", "step", "smoothstep", "isnan", "isinf", "floatBitsToInt", "floatBitsToUint", "intBitsToFloat",
    "uintBitsToFloat", "packSnorm2x16", "unpackSnorm2x16", "packUnorm2x16", "unpackUnorm2x16", "packHalf2x16",
    "unpackHalf2x16",
    // Geometric functions
    "length", "distance", "dot", "cross", "normalize", "faceforward", "reflect", "refract",
    // Matrix functions
    "matrixCompMult", "outerProduct", "transpose", "determinant", "inverse",
    // Vector relational functions
    "lessThan", "lessThanEqual", "greaterThan", "greaterThanEqual", "equal", "notEqual", "any", "all", "not",
    // Texture lookup functions
    "texture2D", "texture2DProj", "texture2DLod", "texture2DProjLod", "textureCube", "textureCubeLod",
    "texture2DLodEXT", "texture2DProjLodEXT", "textureCubeLodEXT", "texture2DGradEXT", "texture2DProjGradEXT",
    "textureCubeGradEXT", "texture", "textureProj", "textureLod", "textureOffset", "texelFetch",
    "texelFetchOffset", "textureProjOffset", "textureLodOffset", "textureProjLod", "textureProjLodOffset",
    "textureGrad", "textureGradOffset", "textureProjGrad", "textureProjGradOffset", "textureSize",
    // Fragment processing functions
    "dFdx", "dFdy", "fwidth",
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reserved_words_are_unique() {
        let unique: HashSet<_> = RESERVED_WORDS.iter().collect();
        assert_eq!(unique.len(), RESERVED_WORDS.len());
    }

    #[test]
    fn test_interface_keywords_are_reserved() {
        for keyword in ["attribute", "uniform", "varying", "main", "float", "return"] {
            assert!(RESERVED_WORDS.contains(&keyword), "{keyword} should be reserved");
        }
    }

    #[test]
    fn test_layout_qualifiers_are_reserved() {
        for qualifier in ["location", "binding", "std140", "std430", "shared", "packed", "row_major", "column_major", "index", "offset"] {
            assert!(RESERVED_WORDS.contains(&qualifier), "{qualifier} should be reserved");
        }
    }
}
