use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::RetrowaveError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming shaders
/// use `#import retrowave::module::item` to pull in shared code. The composer
/// produces `naga::Module` IR directly, skipping WGSL re-parse at runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path)
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Shared modules in dependency order.
const MODULES: &[ModuleDef] = &[
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/camera.wgsl"),
        file_path: "modules/camera.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/fog.wgsl"),
        file_path: "modules/fog.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/object.wgsl"),
        file_path: "modules/object.wgsl",
    },
    ModuleDef {
        source: include_str!("../../assets/shaders/modules/lighting.wgsl"),
        file_path: "modules/lighting.wgsl",
    },
];

/// Mesh (triangles and lines) shader source.
pub const MESH_SHADER: (&str, &str) =
    (include_str!("../../assets/shaders/mesh.wgsl"), "mesh.wgsl");
/// Star sprite shader source.
pub const STARS_SHADER: (&str, &str) =
    (include_str!("../../assets/shaders/stars.wgsl"), "stars.wgsl");

fn shader_error(file_path: &str, e: &ComposerError) -> RetrowaveError {
    RetrowaveError::Shader(format!("{file_path}: {e}"))
}

impl ShaderComposer {
    /// Composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, RetrowaveError> {
        let mut composer = Composer::default();
        for m in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| shader_error(m.file_path, &e))?;
        }
        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, RetrowaveError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader source into a `naga::Module` without creating a wgpu
    /// shader module. Useful for testing shader composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`RetrowaveError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, RetrowaveError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| shader_error(file_path, &e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in [MESH_SHADER, STARS_SHADER] {
            let module = composer.compose_naga(source, file_path);
            assert!(module.is_ok(), "{file_path}: {:?}", module.err());
        }
    }

    #[test]
    fn shaders_expose_entry_points() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer
            .compose_naga(MESH_SHADER.0, MESH_SHADER.1)
            .unwrap();
        let names: Vec<&str> =
            module.entry_points.iter().map(|e| e.name.as_str()).collect();
        assert!(names.contains(&"vs_main"));
        assert!(names.contains(&"fs_main"));
    }

    #[test]
    fn unknown_import_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let source = "#import retrowave::missing::thing\n\
            @fragment\n\
            fn fs_main() -> @location(0) vec4<f32> {\n\
                return thing();\n\
            }\n";
        let result = composer.compose_naga(source, "broken.wgsl");
        assert!(matches!(result, Err(RetrowaveError::Shader(_))));
    }
}
