//! Handlebars templates for generated admin classes

/// Eloquent model with the CRUD trait
pub const MODEL_TEMPLATE: &str = r"<?php

namespace App\Models;

use Backpack\CRUD\app\Models\Traits\CrudTrait;
use Illuminate\Database\Eloquent\Factories\HasFactory;
use Illuminate\Database\Eloquent\Model;

class {{name}} extends Model
{
    use CrudTrait;
    use HasFactory;

    protected $table = '{{table}}';
    protected $guarded = ['id'];
}
";

/// CRUD controller; the validation parts are filled in per strategy
pub const CONTROLLER_TEMPLATE: &str = r"<?php

namespace App\Http\Controllers\Admin;

{{request_import}}use Backpack\CRUD\app\Http\Controllers\CrudController;
use Backpack\CRUD\app\Library\CrudPanel\CrudPanelFacade as CRUD;

/**
 * Class {{name}}CrudController
 * @package App\Http\Controllers\Admin
 * @property-read \Backpack\CRUD\app\Library\CrudPanel\CrudPanel $crud
 */
class {{name}}CrudController extends CrudController
{
    use \Backpack\CRUD\app\Http\Controllers\Operations\ListOperation;
    use \Backpack\CRUD\app\Http\Controllers\Operations\CreateOperation;
    use \Backpack\CRUD\app\Http\Controllers\Operations\UpdateOperation;
    use \Backpack\CRUD\app\Http\Controllers\Operations\DeleteOperation;
    use \Backpack\CRUD\app\Http\Controllers\Operations\ShowOperation;

    public function setup()
    {
        CRUD::setModel({{model_class}}::class);
        CRUD::setRoute(config('backpack.base.route_prefix') . '/{{kebab}}');
        CRUD::setEntityNameStrings('{{singular_label}}', '{{plural_label}}');
    }

    protected function setupListOperation()
    {
        CRUD::setFromDb();
    }

    protected function setupCreateOperation()
    {
{{validation_rules}}        CRUD::setFromDb();
{{field_rules}}    }

    protected function setupUpdateOperation()
    {
        $this->setupCreateOperation();
    }
}
";

/// Form request holding create/update rules
pub const REQUEST_TEMPLATE: &str = r"<?php

namespace App\Http\Requests;

use Illuminate\Foundation\Http\FormRequest;

class {{name}}Request extends FormRequest
{
    public function authorize()
    {
        return backpack_auth()->check();
    }

    public function rules()
    {
        return [
            // 'name' => 'required|min:5|max:255'
        ];
    }

    public function attributes()
    {
        return [];
    }

    public function messages()
    {
        return [];
    }
}
";
