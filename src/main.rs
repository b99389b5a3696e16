//! Optical Flat entry point
//!
//! Web: wires the paired controls to the engine and redraws on every input.
//! Native: computes one configuration from the command line and prints it.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, HtmlInputElement};

    use optical_flat::controls::{ControlValues, Parameter};
    use optical_flat::optics::{IncidenceGeometry, SceneConfig, Viewport, compute_ray_path};
    use optical_flat::renderer::{RenderState, SceneFrame, build_scene};
    use optical_flat::settings::Settings;

    const CANVAS_ID: &str = "viewport";
    const RESULT_ID: &str = "result";
    const LABEL_ID: &str = "shift-label";

    /// Slider and number entry for one parameter
    struct ControlPair {
        slider: HtmlInputElement,
        number: HtmlInputElement,
    }

    impl ControlPair {
        fn find(document: &Document, parameter: Parameter) -> Option<Self> {
            let slider = document
                .get_element_by_id(parameter.slider_id())?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            let number = document
                .get_element_by_id(parameter.number_id())?
                .dyn_into::<HtmlInputElement>()
                .ok()?;
            Some(Self { slider, number })
        }

        fn set_both(&self, text: &str) {
            self.slider.set_value(text);
            self.number.set_value(text);
        }
    }

    /// Application state; inputs are copied in, never read from the DOM by the engine
    struct App {
        geometry: IncidenceGeometry,
        scene: SceneConfig,
        controls: ControlValues,
        render_state: Option<RenderState>,
        thickness_pair: Option<ControlPair>,
        document: Document,
    }

    impl App {
        /// Full recompute: engine, scene, DOM text, GPU
        fn redraw(&mut self) {
            let path = compute_ray_path(&self.geometry, self.controls.plate(), &self.scene);
            let frame = build_scene(&self.geometry, &path, &self.scene);

            if let Some(pair) = &self.thickness_pair {
                if let Some(text) =
                    Parameter::Thickness.normalized_display(path.plate.thickness_mm())
                {
                    pair.set_both(&text);
                }
            }

            self.update_text(&frame);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render_or_recover(&frame.vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Readout and the label overlay
        fn update_text(&self, frame: &SceneFrame) {
            if let Some(el) = self.document.get_element_by_id(RESULT_ID) {
                el.set_text_content(Some(&frame.readout));
            }

            let label = self
                .document
                .get_element_by_id(LABEL_ID)
                .and_then(|el| el.dyn_into::<HtmlElement>().ok());
            if let Some(el) = label {
                el.set_text_content(Some(&frame.label.text));
                let style = el.style();
                let _ = style.set_property("left", &format!("{}px", frame.label.anchor.x));
                let _ = style.set_property("top", &format!("{}px", frame.label.anchor.y));
                // Anchor is the bottom-center of the text
                let _ = style.set_property("transform", "translate(-50%, -100%)");
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }

        log::info!("Optical Flat starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id(CANVAS_ID)
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No canvas #{}", CANVAS_ID);
            return;
        };

        let settings = Settings::load();
        let width = canvas.width();
        let height = canvas.height();
        let scene = settings
            .scene_config()
            .with_viewport(Viewport::new(width as f64, height as f64));

        let app = Rc::new(RefCell::new(App {
            geometry: IncidenceGeometry::new(),
            scene,
            controls: settings.initial_controls(),
            render_state: None,
            thickness_pair: ControlPair::find(&document, Parameter::Thickness),
            document: document.clone(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height).await {
                            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create renderer: {e}"),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {e}"),
                }
            }
            Err(e) => log::error!("Failed to create surface: {e}"),
        }

        for parameter in Parameter::ALL {
            match ControlPair::find(&document, parameter) {
                Some(pair) => {
                    let initial = app.borrow().controls.get(parameter);
                    pair.set_both(
                        &parameter
                            .normalized_display(initial)
                            .unwrap_or_else(|| initial.to_string()),
                    );
                    setup_control_pair(pair, parameter, app.clone());
                }
                None => log::warn!("Missing controls for {}", parameter.as_str()),
            }
        }

        app.borrow_mut().redraw();

        log::info!("Optical Flat running!");
    }

    /// Mirror each control into its partner and redraw on every edit
    fn setup_control_pair(pair: ControlPair, parameter: Parameter, app: Rc<RefCell<App>>) {
        for (source, partner) in [
            (pair.slider.clone(), pair.number.clone()),
            (pair.number.clone(), pair.slider.clone()),
        ] {
            let app = app.clone();
            let source_clone = source.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let raw = source_clone.value();
                partner.set_value(&raw);

                let mut a = app.borrow_mut();
                a.controls.apply(parameter, &raw);
                a.redraw();
            });
            let _ = source
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use optical_flat::controls::{Parameter, parse_value};
    use optical_flat::optics::{IncidenceGeometry, compute_ray_path};
    use optical_flat::renderer::build_scene;
    use optical_flat::settings::Settings;

    env_logger::init();
    log::info!("Optical Flat (native) starting...");

    let settings = Settings::load();
    let mut controls = settings.initial_controls();

    // Usage: optical-flat [refractive_index] [thickness_mm]
    let args: Vec<String> = std::env::args().skip(1).collect();
    for (raw, parameter) in args.iter().zip(Parameter::ALL) {
        if parse_value(raw).is_none() {
            eprintln!("Invalid {}: {:?}", parameter.as_str(), raw);
            std::process::exit(2);
        }
        controls.apply(parameter, raw);
    }

    let geometry = IncidenceGeometry::new();
    let scene = settings.scene_config();
    let path = compute_ray_path(&geometry, controls.plate(), &scene);
    let frame = build_scene(&geometry, &path, &scene);
    log::debug!("Scene: {} vertices", frame.vertices.len());

    println!("{}", path.readout());
    println!(
        "refraction angle: {:.3}°",
        path.refraction_angle.to_degrees()
    );
    match serde_json::to_string_pretty(&path) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize ray path: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
